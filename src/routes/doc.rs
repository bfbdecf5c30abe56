use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        catalog::{AvailabilityRequest, ItemList, RatedItem, RatedSeller, SellerList, UpsertItemRequest},
        orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
        partners::{AddEarningsRequest, DeliveryPartnerList, UpdatePartnerStatusRequest},
        reviews::{Eligibility, ReviewList, SubmitReviewRequest},
        users::{UpdateProfileRequest, UpdateUserStatusRequest, UserList},
    },
    events::OrderPlaced,
    models::{
        Address, AuditEntry, BusinessPartner, CatalogItem, CustomizationGroup, CustomizationOption,
        DeliveryPartner, Order, OrderLine, OrderStatus, PaymentMethod, Review, TargetKind, User,
        Variant,
    },
    response::{ApiResponse, Meta},
    routes::{admin, business, catalog, health, orders, partners, reviews, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::list_sellers,
        catalog::list_items,
        catalog::get_item,
        orders::checkout,
        orders::list_my_orders,
        orders::get_order,
        orders::update_order_status,
        orders::delete_order,
        orders::order_stream,
        reviews::submit_review,
        reviews::list_reviews,
        reviews::review_eligibility,
        reviews::delete_review,
        users::start_session,
        users::my_profile,
        users::update_profile,
        users::add_address,
        users::remove_address,
        users::add_payment_method,
        users::remove_payment_method,
        business::my_business,
        business::incoming_orders,
        business::upsert_menu_item,
        business::set_item_availability,
        business::delete_menu_item,
        partners::list_delivery_partners,
        partners::my_delivery_profile,
        partners::set_business_status,
        partners::set_delivery_status,
        partners::add_earnings,
        admin::list_all_orders,
        admin::list_users,
        admin::update_user_status,
        admin::list_audit,
        admin::export_collection
    ),
    components(
        schemas(
            User,
            Address,
            PaymentMethod,
            CatalogItem,
            Variant,
            CustomizationGroup,
            CustomizationOption,
            Order,
            OrderLine,
            OrderStatus,
            Review,
            TargetKind,
            BusinessPartner,
            DeliveryPartner,
            AuditEntry,
            OrderPlaced,
            SellerList,
            ItemList,
            RatedItem,
            RatedSeller,
            UpsertItemRequest,
            AvailabilityRequest,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderList,
            SubmitReviewRequest,
            ReviewList,
            Eligibility,
            UpdateProfileRequest,
            UpdateUserStatusRequest,
            UserList,
            UpdatePartnerStatusRequest,
            AddEarningsRequest,
            DeliveryPartnerList,
            admin::AuditList,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<RatedItem>,
            ApiResponse<SellerList>,
            ApiResponse<ItemList>,
            ApiResponse<User>,
            ApiResponse<Review>,
            ApiResponse<ReviewList>,
            ApiResponse<Eligibility>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Public seller and menu endpoints"),
        (name = "Orders", description = "Checkout and order endpoints"),
        (name = "Reviews", description = "Review and eligibility endpoints"),
        (name = "Users", description = "Account and profile endpoints"),
        (name = "Business", description = "Seller-facing endpoints"),
        (name = "Partners", description = "Partner management endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
