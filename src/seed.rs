use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    models::{
        BusinessPartner, CatalogItem, CustomizationGroup, CustomizationOption, DeliveryPartner,
        PartnerKind, PartnerStatus, SelectionMode, Variant, VehicleKind,
    },
    store::{Store, StoreError},
};

/// Bump when the reference data below changes shape or content; live
/// user/order/review collections are never touched by a reseed.
pub const SEED_VERSION: u32 = 1;

pub async fn seed_reference_data(store: &Store) -> Result<(), StoreError> {
    let current = store.seed_version().await?;
    if current >= SEED_VERSION {
        return Ok(());
    }
    tracing::info!(from = current, to = SEED_VERSION, "seeding reference data");

    store
        .business_partners
        .replace_all(business_partners())
        .await?;

    // Earnings are a live counter; carry them forward across reseeds.
    let existing = store.delivery_partners.all().await;
    let mut fleet = delivery_partners();
    for partner in &mut fleet {
        if let Some(previous) = existing.iter().find(|p| p.id == partner.id) {
            partner.earnings = previous.earnings;
        }
    }
    store.delivery_partners.replace_all(fleet).await?;

    for (seller_id, items) in catalogs() {
        store.catalog.replace_all(seller_id, items).await?;
    }

    store.set_seed_version(SEED_VERSION).await?;
    tracing::info!("reference data seeded");
    Ok(())
}

fn business_partners() -> Vec<BusinessPartner> {
    vec![
        business(
            1,
            "Spice Route Kitchen",
            "orders@spiceroute.example",
            "+91 98450 11223",
            PartnerKind::Restaurant,
        ),
        business(
            2,
            "Bombay Biryani House",
            "hello@bombaybiryani.example",
            "+91 98220 44556",
            PartnerKind::Restaurant,
        ),
        business(
            3,
            "Green Leaf Cafe",
            "cafe@greenleaf.example",
            "+91 99870 77889",
            PartnerKind::Restaurant,
        ),
        business(
            4,
            "Daily Needs Mart",
            "store@dailyneeds.example",
            "+91 98110 33445",
            PartnerKind::GroceryStore,
        ),
        business(
            5,
            "Wellness Pharmacy",
            "care@wellnesspharma.example",
            "+91 97420 66778",
            PartnerKind::Pharmacy,
        ),
    ]
}

fn delivery_partners() -> Vec<DeliveryPartner> {
    vec![
        rider(1, "Ravi Kumar", "ravi.k@riders.example", "+91 90080 12131", VehicleKind::Bike),
        rider(2, "Sunil Yadav", "sunil.y@riders.example", "+91 90080 41516", VehicleKind::Scooter),
        rider(3, "Meena Joshi", "meena.j@riders.example", "+91 90080 71819", VehicleKind::Bicycle),
    ]
}

fn catalogs() -> Vec<(i64, Vec<CatalogItem>)> {
    vec![
        (1, spice_route_menu()),
        (2, biryani_house_menu()),
        (3, green_leaf_menu()),
        (4, grocery_shelf()),
        (5, pharmacy_shelf()),
    ]
}

fn spice_route_menu() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            variants: vec![variant("Half", 220), variant("Full", 320)],
            customizations: vec![group(
                "Add-ons",
                SelectionMode::Multiple,
                false,
                vec![add_on("Extra Paneer", 60), add_on("Butter Naan", 45)],
            )],
            ..item(101, "Paneer Butter Masala", "Main Course", 220)
        },
        CatalogItem {
            variants: vec![variant("Half", 180), variant("Full", 280)],
            customizations: vec![group(
                "Sides",
                SelectionMode::Single,
                false,
                vec![add_on("Raita", 30), add_on("Salan", 25)],
            )],
            ..item(102, "Veg Biryani", "Rice", 180)
        },
        CatalogItem {
            customizations: vec![group(
                "Extras",
                SelectionMode::Multiple,
                false,
                vec![add_on("Extra Chutney", 20), add_on("Ghee", 25)],
            )],
            ..item(103, "Masala Dosa", "South Indian", 120)
        },
    ]
}

fn biryani_house_menu() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            variants: vec![
                variant("Half", 260),
                variant("Full", 420),
                variant("Family Pack", 780),
            ],
            customizations: vec![group(
                "Extras",
                SelectionMode::Multiple,
                false,
                vec![
                    add_on("Extra Raita", 30),
                    add_on("Boiled Egg", 20),
                    add_on("Gulab Jamun", 40),
                ],
            )],
            ..item(201, "Chicken Biryani", "Biryani", 260)
        },
        CatalogItem {
            variants: vec![variant("Half", 340), variant("Full", 560)],
            ..item(202, "Mutton Biryani", "Biryani", 340)
        },
        item(203, "Chicken 65", "Starters", 240),
    ]
}

fn green_leaf_menu() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            variants: vec![variant("Regular", 140), variant("Large", 180)],
            customizations: vec![group(
                "Toppings",
                SelectionMode::Multiple,
                false,
                vec![add_on("Ice Cream Scoop", 40), add_on("Chocolate Shavings", 25)],
            )],
            ..item(301, "Cold Coffee", "Beverages", 140)
        },
        CatalogItem {
            customizations: vec![group(
                "Bread",
                SelectionMode::Single,
                true,
                vec![add_on("White", 0), add_on("Multigrain", 15)],
            )],
            ..item(302, "Veg Club Sandwich", "Snacks", 90)
        },
        item(303, "Pasta Alfredo", "Mains", 210),
    ]
}

fn grocery_shelf() -> Vec<CatalogItem> {
    vec![
        item(401, "Basmati Rice 5kg", "Staples", 520),
        item(402, "Toor Dal 1kg", "Staples", 165),
        item(403, "Sunflower Oil 1L", "Staples", 140),
        item(404, "Whole Wheat Atta 10kg", "Staples", 430),
    ]
}

fn pharmacy_shelf() -> Vec<CatalogItem> {
    vec![
        item(501, "Paracetamol 500mg, 15 tablets", "Medicines", 30),
        item(502, "Vitamin C Chewables", "Supplements", 145),
        item(503, "Digital Thermometer", "Devices", 240),
    ]
}

fn item(id: i64, name: &str, category: &str, price: i64) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price: Decimal::from(price),
        variants: Vec::new(),
        customizations: Vec::new(),
        available: true,
        image: None,
    }
}

fn variant(name: &str, price: i64) -> Variant {
    Variant {
        name: name.to_string(),
        price: Decimal::from(price),
    }
}

fn add_on(name: &str, delta: i64) -> CustomizationOption {
    CustomizationOption {
        name: name.to_string(),
        price: Decimal::from(delta),
    }
}

fn group(
    name: &str,
    mode: SelectionMode,
    required: bool,
    options: Vec<CustomizationOption>,
) -> CustomizationGroup {
    CustomizationGroup {
        name: name.to_string(),
        mode,
        required,
        options,
    }
}

fn business(id: i64, name: &str, email: &str, phone: &str, kind: PartnerKind) -> BusinessPartner {
    BusinessPartner {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        kind,
        status: PartnerStatus::Active,
        joined_at: Utc::now(),
    }
}

fn rider(id: i64, name: &str, email: &str, phone: &str, vehicle: VehicleKind) -> DeliveryPartner {
    DeliveryPartner {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        vehicle,
        status: PartnerStatus::Active,
        earnings: Decimal::ZERO,
        joined_at: Utc::now(),
    }
}
