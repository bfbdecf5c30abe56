use kirana_core::{
    dto::{orders::CheckoutRequest, reviews::{Eligibility, SubmitReviewRequest}},
    error::AppError,
    middleware::auth::Identity,
    models::{OrderLine, TargetKind},
    seed::seed_reference_data,
    services::{catalog_service, order_service, review_service},
    state::AppState,
};
use rust_decimal::Decimal;

// Reviews are purchase-gated: the right to review appears after checkout,
// disappears once used, and the aggregate rating follows the submissions.

#[tokio::test]
async fn eligibility_follows_purchase_then_review() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    let before = review_service::eligibility_for(&state, &asha.email, TargetKind::Product, 101).await;
    assert_eq!(
        before,
        Eligibility {
            can_review: false,
            has_reviewed: false
        }
    );

    purchase(&state, "asha@example.com", 1, 101).await?;

    let after_purchase =
        review_service::eligibility_for(&state, &asha.email, TargetKind::Product, 101).await;
    assert_eq!(
        after_purchase,
        Eligibility {
            can_review: true,
            has_reviewed: false
        }
    );
    // Buying from the seller also unlocks the seller review.
    let restaurant =
        review_service::eligibility_for(&state, &asha.email, TargetKind::Restaurant, 1).await;
    assert!(restaurant.can_review);

    review_service::submit(
        &state,
        &asha,
        review_request(TargetKind::Product, 101, 5, "Perfect gravy"),
    )
    .await?;

    let after_review =
        review_service::eligibility_for(&state, &asha.email, TargetKind::Product, 101).await;
    assert_eq!(
        after_review,
        Eligibility {
            can_review: false,
            has_reviewed: true
        }
    );
    // The seller target is untouched by the product review.
    let restaurant =
        review_service::eligibility_for(&state, &asha.email, TargetKind::Restaurant, 1).await;
    assert!(restaurant.can_review && !restaurant.has_reviewed);

    Ok(())
}

#[tokio::test]
async fn reviews_require_a_purchase() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    let err = review_service::submit(
        &state,
        &asha,
        review_request(TargetKind::Product, 101, 4, "Never ordered this"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn second_review_of_the_same_target_conflicts() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    purchase(&state, "asha@example.com", 1, 101).await?;

    review_service::submit(&state, &asha, review_request(TargetKind::Product, 101, 4, "Good"))
        .await?;
    let err = review_service::submit(
        &state,
        &asha,
        review_request(TargetKind::Product, 101, 5, "Changed my mind"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn rating_must_be_one_to_five() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    for rating in [0, 6] {
        let err = review_service::submit(
            &state,
            &asha,
            review_request(TargetKind::Product, 101, rating, "Out of range"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    Ok(())
}

#[tokio::test]
async fn unrated_targets_default_then_average_to_one_decimal() -> anyhow::Result<()> {
    let state = setup().await?;

    let (rating, count) = catalog_service::target_rating(&state.store, TargetKind::Product, 101).await;
    assert_eq!(rating, Decimal::new(35, 1));
    assert_eq!(count, 0);

    // Four buyers: 4, 4, 4 and 5 average to 4.25, which rounds up.
    for (email, stars) in [
        ("a@example.com", 4),
        ("b@example.com", 4),
        ("c@example.com", 4),
        ("d@example.com", 5),
    ] {
        purchase(&state, email, 1, 101).await?;
        review_service::submit(
            &state,
            &customer(email, "Buyer"),
            review_request(TargetKind::Product, 101, stars, "ok"),
        )
        .await?;
    }

    let (rating, count) = catalog_service::target_rating(&state.store, TargetKind::Product, 101).await;
    assert_eq!(rating, Decimal::new(43, 1));
    assert_eq!(count, 4);

    Ok(())
}

#[tokio::test]
async fn seller_listings_carry_live_ratings() -> anyhow::Result<()> {
    let state = setup().await?;

    let sellers = catalog_service::list_sellers(&state).await?.data.unwrap();
    assert!(sellers
        .items
        .iter()
        .all(|s| s.rating == Decimal::new(35, 1) && s.review_count == 0));

    purchase(&state, "asha@example.com", 1, 101).await?;
    review_service::submit(
        &state,
        &customer("asha@example.com", "Asha"),
        review_request(TargetKind::Restaurant, 1, 5, "Quick and hot"),
    )
    .await?;

    let sellers = catalog_service::list_sellers(&state).await?.data.unwrap();
    let spice_route = sellers.items.iter().find(|s| s.partner.id == 1).unwrap();
    assert_eq!(spice_route.rating, Decimal::from(5));
    assert_eq!(spice_route.review_count, 1);

    let menu = catalog_service::list_items(&state, 1).await?.data.unwrap();
    let paneer = menu.items.iter().find(|i| i.item.id == 101).unwrap();
    // Product ratings are independent of the seller review.
    assert_eq!(paneer.rating, Decimal::new(35, 1));

    Ok(())
}

#[tokio::test]
async fn reviews_list_newest_first() -> anyhow::Result<()> {
    let state = setup().await?;

    for email in ["a@example.com", "b@example.com"] {
        purchase(&state, email, 1, 101).await?;
        review_service::submit(
            &state,
            &customer(email, email),
            review_request(TargetKind::Product, 101, 4, "ok"),
        )
        .await?;
    }

    let reviews = review_service::list_for_target(&state, TargetKind::Product, 101)
        .await?
        .data
        .unwrap();
    assert_eq!(reviews.items.len(), 2);
    assert_eq!(reviews.items[0].author_email, "b@example.com");
    assert!(reviews.items[0].created_at >= reviews.items[1].created_at);

    Ok(())
}

#[tokio::test]
async fn deleting_a_review_restores_the_review_right() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    purchase(&state, "asha@example.com", 1, 101).await?;

    let review = review_service::submit(
        &state,
        &asha,
        review_request(TargetKind::Product, 101, 2, "Cold on arrival"),
    )
    .await?
    .data
    .unwrap();

    let err = review_service::delete_review(&state, &asha, review.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    review_service::delete_review(&state, &admin(), review.id).await?;

    // The purchase still stands, so the right to review comes back.
    let elig = review_service::eligibility_for(&state, &asha.email, TargetKind::Product, 101).await;
    assert_eq!(
        elig,
        Eligibility {
            can_review: true,
            has_reviewed: false
        }
    );

    let err = review_service::delete_review(&state, &admin(), review.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Review")));

    Ok(())
}

async fn setup() -> anyhow::Result<AppState> {
    let state = AppState::in_memory().await?;
    seed_reference_data(&state.store).await?;
    Ok(state)
}

fn customer(email: &str, name: &str) -> Identity {
    Identity {
        email: email.into(),
        name: name.into(),
        picture: None,
        role: "customer".into(),
    }
}

fn admin() -> Identity {
    Identity {
        email: "ops@kirana.example".into(),
        name: "Ops".into(),
        picture: None,
        role: "admin".into(),
    }
}

fn review_request(kind: TargetKind, target_id: i64, rating: u8, comment: &str) -> SubmitReviewRequest {
    SubmitReviewRequest {
        target_id,
        kind,
        rating,
        comment: comment.into(),
    }
}

async fn purchase(state: &AppState, email: &str, seller_id: i64, item_id: i64) -> anyhow::Result<()> {
    order_service::checkout(
        state,
        CheckoutRequest {
            seller_id,
            customer_name: email.into(),
            customer_email: Some(email.into()),
            currency: "₹".into(),
            lines: vec![OrderLine {
                item_id,
                name: "Seeded item".into(),
                variant: "Full".into(),
                options: vec![],
                unit_price: Decimal::from(320),
                quantity: 1,
            }],
        },
    )
    .await?;
    Ok(())
}
