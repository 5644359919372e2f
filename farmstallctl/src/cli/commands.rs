use anyhow::Context;
use dialoguer::{Input, Password};
use farmstall_client::listing::{
    ProductQuery, SortOrder, filter_orders, paginate, search_categories,
};
use farmstall_client::services::{CategoryService, OrderService, ProductService, ShopService};
use farmstall_client::{ApiError, FailureKind};
use farmstall_model::{CategoryDraft, OrderId, ProductDraft, ProductId, ShopProfileUpdate};
use tracing::info;

use super::context::{AppContext, read_upload};
use super::output::{
    category_table, order_table, page_footer, print_json, product_table, shop_details,
    shop_summary,
};
use super::{
    CategoryCommand, CategoryFields, LoginArgs, OrderArg, OrderCommand, ProductCommand,
    ProductFields, ShopCommand,
};

/// Attach the server's own explanation to a failed call.
fn api_failure(err: ApiError, action: &str) -> anyhow::Error {
    let message = match err.kind() {
        FailureKind::DefiniteAuth => {
            "session expired; run `farmstallctl login` again".to_string()
        }
        _ => err.user_message(&err.to_string()),
    };
    anyhow::Error::new(err).context(format!("{action}: {message}"))
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> anyhow::Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .context("failed to read email")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("failed to read password")?,
    };

    let shop = ctx
        .session
        .login(email.trim(), &password)
        .await
        .context("login failed")?;
    info!(shop = %shop.id, "logged in");

    if ctx.json {
        print_json(&shop)
    } else {
        println!("Logged in as {}", shop_summary(&shop));
        Ok(())
    }
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.session.logout();
    if !ctx.json {
        println!("Logged out");
    }
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> anyhow::Result<()> {
    let shop = ctx.require_login().await?;
    if ctx.json {
        print_json(&shop)
    } else {
        println!("{}", shop_summary(&shop));
        Ok(())
    }
}

fn product_draft(fields: ProductFields) -> anyhow::Result<ProductDraft> {
    let image = fields.image.as_deref().map(read_upload).transpose()?;
    Ok(ProductDraft {
        name: fields.name,
        price: fields.price,
        description: fields.description,
        stock_quantity: fields.stock,
        category_id: fields.category_id.map(Into::into),
        status: fields.status,
        image,
    })
}

pub async fn products(ctx: &AppContext, cmd: ProductCommand) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let service = ctx.products();

    match cmd {
        ProductCommand::List {
            search,
            category,
            sort,
            order,
            paging,
        } => {
            let products = ctx
                .shop()
                .products()
                .await
                .map_err(|e| api_failure(e, "failed to load products"))?;

            let mut query = ProductQuery::default();
            if sort != query.sort_by {
                query.toggle_sort(sort);
            }
            match order {
                Some(OrderArg::Asc) => query.order = SortOrder::Ascending,
                Some(OrderArg::Desc) => query.order = SortOrder::Descending,
                None => {}
            }
            if let Some(search) = search {
                query.search = search;
            }
            if let Some(category) = category {
                query.category = category;
            }

            let view = query.apply(&products);
            let page = paginate(&view, paging.page, paging.per_page);
            if ctx.json {
                return print_json(&page.items);
            }
            println!("{}", product_table(&page.items));
            println!("{}", page_footer(&page));
        }
        ProductCommand::Add(fields) => {
            let draft = product_draft(fields)?;
            let product = service
                .add(&draft)
                .await
                .map_err(|e| api_failure(e, "failed to add product"))?;
            if ctx.json {
                return print_json(&product);
            }
            println!("Added product {} ({})", product.name, product.id);
        }
        ProductCommand::Update { id, fields } => {
            let draft = product_draft(fields)?;
            let product = service
                .update(&ProductId::new(id), &draft)
                .await
                .map_err(|e| api_failure(e, "failed to update product"))?;
            if ctx.json {
                return print_json(&product);
            }
            println!("Updated product {} ({})", product.name, product.id);
        }
        ProductCommand::Delete { id } => {
            service
                .delete(&ProductId::new(id.as_str()))
                .await
                .map_err(|e| api_failure(e, "failed to delete product"))?;
            if !ctx.json {
                println!("Deleted product {id}");
            }
        }
    }
    Ok(())
}

fn category_draft(fields: CategoryFields) -> anyhow::Result<CategoryDraft> {
    let mut draft = CategoryDraft::new(fields.name, fields.description);
    draft.image = fields.image.as_deref().map(read_upload).transpose()?;
    draft.validate()?;
    Ok(draft)
}

pub async fn categories(ctx: &AppContext, cmd: CategoryCommand) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let service = ctx.categories();

    match cmd {
        CategoryCommand::List { search } => {
            let categories = service
                .list()
                .await
                .map_err(|e| api_failure(e, "failed to load categories"))?;
            let view = search_categories(&categories, search.as_deref().unwrap_or(""));
            if ctx.json {
                return print_json(&view);
            }
            println!("{}", category_table(&view));
        }
        CategoryCommand::Add(fields) => {
            let draft = category_draft(fields)?;
            let category = service
                .add(&draft)
                .await
                .map_err(|e| api_failure(e, "failed to add category"))?;
            if ctx.json {
                return print_json(&category);
            }
            println!("Added category {} ({})", category.name, category.id);
        }
        CategoryCommand::Update { id, fields } => {
            let draft = category_draft(fields)?;
            let category = service
                .update(&id.into(), &draft)
                .await
                .map_err(|e| api_failure(e, "failed to update category"))?;
            if ctx.json {
                return print_json(&category);
            }
            println!("Updated category {} ({})", category.name, category.id);
        }
        CategoryCommand::Delete { id } => {
            service
                .delete(&id.as_str().into())
                .await
                .map_err(|e| api_failure(e, "failed to delete category"))?;
            if !ctx.json {
                println!("Deleted category {id}");
            }
        }
    }
    Ok(())
}

pub async fn orders(ctx: &AppContext, cmd: OrderCommand) -> anyhow::Result<()> {
    ctx.require_login().await?;
    let service = ctx.orders();

    let updated = match cmd {
        OrderCommand::List { status, paging } => {
            let orders = service
                .list()
                .await
                .map_err(|e| api_failure(e, "failed to load orders"))?;
            let view = filter_orders(&orders, status);
            let page = paginate(&view, paging.page, paging.per_page);
            if ctx.json {
                return print_json(&page.items);
            }
            println!("{}", order_table(&page.items));
            println!("{}", page_footer(&page));
            return Ok(());
        }
        OrderCommand::Delete { id } => {
            service
                .delete(&OrderId::new(id.as_str()))
                .await
                .map_err(|e| api_failure(e, "failed to delete order"))?;
            if !ctx.json {
                println!("Deleted order {id}");
            }
            return Ok(());
        }
        OrderCommand::Ship { id, tracking } => service
            .ship(&OrderId::new(id), &tracking)
            .await
            .map_err(|e| api_failure(e, "failed to mark order shipped"))?,
        OrderCommand::Deliver { id } => service
            .deliver(&OrderId::new(id))
            .await
            .map_err(|e| api_failure(e, "failed to mark order delivered"))?,
        OrderCommand::Cancel { id, reason } => service
            .cancel(&OrderId::new(id), reason.as_deref())
            .await
            .map_err(|e| api_failure(e, "failed to cancel order"))?,
    };

    if ctx.json {
        return print_json(&updated);
    }
    println!("Order {} is now {}", updated.id, updated.order_status.label());
    Ok(())
}

pub async fn shop(ctx: &AppContext, cmd: ShopCommand) -> anyhow::Result<()> {
    let current = ctx.require_login().await?;
    let service = ctx.shop();

    match cmd {
        ShopCommand::Show => {
            let shop = service
                .profile()
                .await
                .map_err(|e| api_failure(e, "failed to load profile"))?;
            if ctx.json {
                return print_json(&shop);
            }
            println!("{}", shop_details(&shop));
        }
        ShopCommand::Update(fields) => {
            let mut update = ShopProfileUpdate::from_shop(&current);
            if let Some(name) = fields.name {
                update.name = name;
            }
            if let Some(owner_name) = fields.owner_name {
                update.owner_name = owner_name;
            }
            if let Some(email) = fields.email {
                update.email = email;
            }
            if let Some(phone) = fields.phone {
                update.phone_number = phone;
            }
            if let Some(location) = fields.location {
                update.location = location;
            }
            if let Some(description) = fields.description {
                update.description = Some(description);
            }
            update.profile_image = fields.image.as_deref().map(read_upload).transpose()?;

            let shop = service
                .update_profile(&update)
                .await
                .map_err(|e| api_failure(e, "failed to update profile"))?;
            if ctx.json {
                return print_json(&shop);
            }
            println!("Profile updated\n{}", shop_details(&shop));
        }
    }
    Ok(())
}
