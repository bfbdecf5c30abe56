use kirana_core::{
    dto::orders::{CheckoutRequest, UpdateOrderStatusRequest},
    error::AppError,
    middleware::auth::Identity,
    models::{OrderLine, OrderStatus},
    seed::seed_reference_data,
    services::order_service,
    state::AppState,
};
use rust_decimal::Decimal;

// Integration flow: guests and customers check out against seeded sellers,
// sellers and admins read the orders back, admin moves and deletes them.

#[tokio::test]
async fn checkout_prices_the_cart_and_assigns_sequential_ids() -> anyhow::Result<()> {
    let state = setup().await?;

    let resp = order_service::checkout(
        &state,
        request(
            1,
            "Asha",
            Some("asha@example.com"),
            vec![line(101, "Paneer Butter Masala", 320, 2), line(103, "Masala Dosa", 120, 1)],
        ),
    )
    .await?;
    assert_eq!(resp.message, "Checkout success");

    let order = resp.data.unwrap();
    assert_eq!(order.id, 1);
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.subtotal, Decimal::from(760));
    // 760 clears the flat-fee threshold, so the fee is 5%.
    assert_eq!(order.delivery_fee, Decimal::from(38));
    assert_eq!(order.tax, Decimal::from(76));
    assert_eq!(order.total, Decimal::from(874));

    let next = order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(next.id, 2);
    // 120 is below the threshold, flat fee applies.
    assert_eq!(next.delivery_fee, Decimal::from(40));

    Ok(())
}

#[tokio::test]
async fn placed_orders_reach_event_subscribers() -> anyhow::Result<()> {
    let state = setup().await?;
    let mut rx = state.events.subscribe();

    let order = order_service::checkout(
        &state,
        request(2, "Rahul", Some("rahul@example.com"), vec![line(201, "Chicken Biryani", 420, 1)]),
    )
    .await?
    .data
    .unwrap();

    let event = rx.recv().await?;
    assert_eq!(event.order_id, order.id);
    assert_eq!(event.seller_id, 2);

    Ok(())
}

#[tokio::test]
async fn guest_orders_never_join_a_customer_history() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    order_service::checkout(
        &state,
        request(1, "Walk-in", None, vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?;
    order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?;

    let mine = order_service::my_orders(&state, &asha).await?.data.unwrap();
    assert_eq!(mine.items.len(), 1);
    assert_eq!(mine.items[0].customer_email.as_deref(), Some("asha@example.com"));

    // The guest order still exists for the admin.
    let all = order_service::all_orders(&state, &admin()).await?.data.unwrap();
    assert_eq!(all.items.len(), 2);

    Ok(())
}

#[tokio::test]
async fn my_orders_come_back_newest_first() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    for _ in 0..2 {
        order_service::checkout(
            &state,
            request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
        )
        .await?;
    }
    order_service::checkout(
        &state,
        request(1, "Rahul", Some("rahul@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?;

    let mine = order_service::my_orders(&state, &asha).await?.data.unwrap();
    let ids: Vec<i64> = mine.items.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 1]);

    Ok(())
}

#[tokio::test]
async fn sellers_see_only_their_incoming_orders() -> anyhow::Result<()> {
    let state = setup().await?;

    order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?;
    order_service::checkout(
        &state,
        request(2, "Asha", Some("asha@example.com"), vec![line(201, "Chicken Biryani", 420, 1)]),
    )
    .await?;

    let spice_route = business("orders@spiceroute.example");
    let incoming = order_service::seller_orders(&state, &spice_route).await?.data.unwrap();
    assert_eq!(incoming.items.len(), 1);
    assert_eq!(incoming.items[0].seller_id, 1);

    // A business identity not in the partner registry is rejected.
    let unknown = business("nobody@example.com");
    let err = order_service::seller_orders(&state, &unknown).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn order_detail_is_owner_seller_or_admin_only() -> anyhow::Result<()> {
    let state = setup().await?;
    let order = order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?
    .data
    .unwrap();

    let owner = customer("asha@example.com", "Asha");
    assert!(order_service::get_order(&state, &owner, order.id).await.is_ok());

    let seller = business("orders@spiceroute.example");
    assert!(order_service::get_order(&state, &seller, order.id).await.is_ok());

    assert!(order_service::get_order(&state, &admin(), order.id).await.is_ok());

    // Strangers get the same answer as for an id that does not exist.
    let stranger = customer("rahul@example.com", "Rahul");
    let err = order_service::get_order(&state, &stranger, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Order")));

    Ok(())
}

#[tokio::test]
async fn status_updates_persist_verbatim_in_any_direction() -> anyhow::Result<()> {
    let state = setup().await?;
    let order = order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?
    .data
    .unwrap();

    for status in [
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Processing,
    ] {
        let updated = order_service::update_status(
            &state,
            &admin(),
            order.id,
            UpdateOrderStatusRequest { status },
        )
        .await?
        .data
        .unwrap();
        assert_eq!(updated.status, status);

        let fetched = order_service::get_order(&state, &admin(), order.id).await?.data.unwrap();
        assert_eq!(fetched.status, status);
    }

    Ok(())
}

#[tokio::test]
async fn deleted_order_ids_are_never_reused() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");

    for _ in 0..2 {
        order_service::checkout(
            &state,
            request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
        )
        .await?;
    }

    let resp = order_service::delete_order(&state, &admin(), 2).await?;
    assert_eq!(resp.message, "Deleted");

    let mine = order_service::my_orders(&state, &asha).await?.data.unwrap();
    assert_eq!(mine.items.len(), 1);
    assert!(mine.items.iter().all(|o| o.id != 2));

    let next = order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(next.id, 3);

    Ok(())
}

#[tokio::test]
async fn malformed_checkouts_are_rejected() -> anyhow::Result<()> {
    let state = setup().await?;

    let err = order_service::checkout(&state, request(1, "Asha", None, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = order_service::checkout(
        &state,
        request(1, "Asha", None, vec![line(103, "Masala Dosa", 120, 0)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = order_service::checkout(
        &state,
        request(1, "  ", None, vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = order_service::checkout(
        &state,
        request(99, "Asha", None, vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Seller")));

    Ok(())
}

#[tokio::test]
async fn only_admins_move_or_delete_orders() -> anyhow::Result<()> {
    let state = setup().await?;
    let order = order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?
    .data
    .unwrap();

    let owner = customer("asha@example.com", "Asha");
    let err = order_service::update_status(
        &state,
        &owner,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = order_service::delete_order(&state, &owner, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn checkout_leaves_an_audit_entry() -> anyhow::Result<()> {
    let state = setup().await?;

    order_service::checkout(
        &state,
        request(1, "Asha", Some("asha@example.com"), vec![line(103, "Masala Dosa", 120, 1)]),
    )
    .await?;

    let entries = state.store.audit_log.all().await;
    assert!(entries.iter().any(|e| {
        e.action == "checkout" && e.actor.as_deref() == Some("asha@example.com")
    }));

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

fn business(email: &str) -> Identity {
    Identity {
        email: email.into(),
        name: "Seller".into(),
        picture: None,
        role: "business".into(),
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

fn line(item_id: i64, name: &str, unit_price: i64, quantity: u32) -> OrderLine {
    OrderLine {
        item_id,
        name: name.into(),
        variant: "Full".into(),
        options: vec![],
        unit_price: Decimal::from(unit_price),
        quantity,
    }
}

fn request(
    seller_id: i64,
    customer_name: &str,
    customer_email: Option<&str>,
    lines: Vec<OrderLine>,
) -> CheckoutRequest {
    CheckoutRequest {
        seller_id,
        customer_name: customer_name.into(),
        customer_email: customer_email.map(Into::into),
        currency: "₹".into(),
        lines,
    }
}
