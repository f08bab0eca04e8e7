//! # Seed Data Generator
//!
//! Populates the database with a cafe menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kiosk_dev.db with the menu
//! cargo run -p kiosk-db --bin seed
//!
//! # Specify database path
//! cargo run -p kiosk-db --bin seed -- --db ./data/kiosk.db
//!
//! # Also add yesterday's paid orders, so the sales report has data
//! cargo run -p kiosk-db --bin seed -- --with-sales
//! ```
//!
//! Product numbers are assigned with the same rule the server uses, so a
//! seeded database continues at the right number.

use anyhow::{bail, Context};
use chrono::{Days, Local, NaiveTime};
use std::env;

use kiosk_core::product_number::next_product_number;
use kiosk_core::{Money, NewOrder, NewProduct, OrderStatus, ProductSellingStatus, ProductType};
use kiosk_db::{Database, DbConfig};

/// The cafe menu: (type, status, name, price in won)
const MENU: &[(ProductType, ProductSellingStatus, &str, i64)] = &[
    (ProductType::Handmade, ProductSellingStatus::Selling, "Americano", 4000),
    (ProductType::Handmade, ProductSellingStatus::Selling, "Cafe latte", 4500),
    (ProductType::Handmade, ProductSellingStatus::Selling, "Vanilla latte", 5000),
    (ProductType::Handmade, ProductSellingStatus::Hold, "Cappuccino", 5000),
    (ProductType::Handmade, ProductSellingStatus::StopSelling, "Patbingsu", 9000),
    (ProductType::Bottle, ProductSellingStatus::Selling, "Sparkling water", 2000),
    (ProductType::Bottle, ProductSellingStatus::Selling, "Orange juice", 3500),
    (ProductType::Bakery, ProductSellingStatus::Selling, "Croissant", 3500),
    (ProductType::Bakery, ProductSellingStatus::Selling, "Bagel", 3000),
    (ProductType::Bakery, ProductSellingStatus::Hold, "Cheesecake", 6000),
];

/// Yesterday's paid orders, as indices into the seeded menu.
const SALES: &[(u32, &[usize])] = &[(9, &[0, 7]), (12, &[1, 1, 8]), (15, &[5]), (18, &[2, 6])];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kiosk_dev.db");
    let mut with_sales = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--with-sales" => with_sales = true,
            "--help" | "-h" => {
                println!("Cafe Kiosk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kiosk_dev.db)");
                println!("      --with-sales   Add paid orders for yesterday");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    println!("🌱 Cafe Kiosk Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut seeded = Vec::with_capacity(MENU.len());
    for (product_type, selling_status, name, price) in MENU {
        let latest = db.products().find_latest_product_number().await?;
        let product_number = next_product_number(latest.as_deref())?;

        let product = db
            .products()
            .insert(&NewProduct {
                product_number,
                product_type: *product_type,
                selling_status: *selling_status,
                name: (*name).to_string(),
                price: Money::from_won(*price),
            })
            .await
            .with_context(|| format!("inserting {name}"))?;

        println!(
            "  {} {:<16} {:>6} won  [{}]",
            product.product_number,
            product.name,
            product.price,
            product.selling_status.text()
        );
        seeded.push(product);
    }

    println!();
    println!("✓ Seeded {} products", seeded.len());

    if with_sales {
        let yesterday = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(1))
            .context("computing yesterday")?;

        let mut total = Money::zero();
        for (hour, lines) in SALES {
            let products = lines.iter().map(|&idx| seeded[idx].clone()).collect();
            let registered = yesterday.and_time(
                NaiveTime::from_hms_opt(*hour, 0, 0).context("building order time")?,
            );
            let order = db
                .orders()
                .place(&NewOrder::with_status(
                    OrderStatus::PaymentCompleted,
                    products,
                    registered,
                )?)
                .await?;
            total = total
                .checked_add(order.total_price())
                .context("summing seeded sales")?;
        }

        println!("✓ Seeded {} paid orders for {} ({} won)", SALES.len(), yesterday, total);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
