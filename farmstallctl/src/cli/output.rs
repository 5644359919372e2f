use farmstall_client::listing::Page;
use farmstall_model::{Category, Order, Product, Shop};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned plain-text table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![
        render_line(headers.iter().copied(), &widths),
        render_line(dashes.iter().map(String::as_str), &widths),
    ];
    for row in rows {
        out.push(render_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn shop_summary(shop: &Shop) -> String {
    let state = if shop.is_banned {
        "banned"
    } else if shop.is_approved {
        "approved"
    } else {
        "pending approval"
    };
    format!("{} <{}> (id {}, {})", shop.name, shop.email, shop.id, state)
}

pub fn shop_details(shop: &Shop) -> String {
    let rows = [
        ("Name", shop.name.clone()),
        ("Owner", shop.owner_name.clone()),
        ("Email", shop.email.clone()),
        ("Phone", shop.phone_number.clone()),
        ("Location", shop.location.clone()),
        ("Type", shop.shop_type.clone()),
        ("Description", shop.description.clone().unwrap_or_default()),
        ("Verified", yes_no(shop.is_verified).to_string()),
        ("Approved", yes_no(shop.is_approved).to_string()),
        ("Banned", yes_no(shop.is_banned).to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{label:<12} {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn product_table(products: &[&Product]) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                format!("{:.2}", p.price),
                p.stock_quantity.to_string(),
                p.category_name().unwrap_or("-").to_string(),
                p.status.to_string(),
            ]
        })
        .collect();
    render_table(&["ID", "NAME", "PRICE", "STOCK", "CATEGORY", "STATUS"], &rows)
}

pub fn category_table(categories: &[&Category]) -> String {
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.products.len().to_string(),
                c.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["ID", "NAME", "PRODUCTS", "DESCRIPTION"], &rows)
}

pub fn order_table(orders: &[&Order]) -> String {
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                o.user.as_ref().map(|u| u.full_name()).unwrap_or_default(),
                o.order_items.len().to_string(),
                format!("{:.2}", o.total_amount),
                o.order_status.label().to_string(),
                o.created_at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["ID", "CUSTOMER", "ITEMS", "TOTAL", "STATUS", "PLACED"], &rows)
}

pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "page {}/{} ({} total)",
        page.page, page.total_pages, page.total_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_columns_are_aligned() {
        let rows = vec![
            vec!["1".to_string(), "Carrots".to_string()],
            vec!["22".to_string(), "Eggs".to_string()],
        ];
        let table = render_table(&["ID", "NAME"], &rows);
        assert_eq!(table, "ID  NAME\n--  -------\n1   Carrots\n22  Eggs");
    }

    #[test]
    fn shop_summary_reports_approval() {
        let shop = Shop {
            id: "s1".into(),
            name: "Hill Farm".into(),
            email: "hi@hill.farm".into(),
            is_approved: false,
            ..Shop::default()
        };
        assert_eq!(shop_summary(&shop), "Hill Farm <hi@hill.farm> (id s1, pending approval)");
    }
}
