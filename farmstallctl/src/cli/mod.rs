//! Argument definitions and dispatch.

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use farmstall_client::listing::{OrderFilter, ProductSortField};
use farmstall_model::ProductStatus;

pub use context::AppContext;

#[derive(Parser, Debug)]
#[command(name = "farmstallctl", version)]
#[command(about = "Manage a Farmstall shop: products, categories, orders and profile")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a farmstall.toml configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Show the signed-in shop
    Whoami,
    /// Manage products
    #[command(subcommand)]
    Products(ProductCommand),
    /// Manage categories
    #[command(subcommand)]
    Categories(CategoryCommand),
    /// Review and fulfil orders
    #[command(subcommand)]
    Orders(OrderCommand),
    /// View or edit the shop profile
    #[command(subcommand)]
    Shop(ShopCommand),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email; prompted when omitted
    #[arg(long, short)]
    pub email: Option<String>,

    /// Password; prompted without echo when omitted
    #[arg(long, env = "FARMSTALL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value_t = 20)]
    pub per_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// List the shop's products
    List {
        /// Case-insensitive name search
        #[arg(long, short)]
        search: Option<String>,
        /// Only products in this category ("all" for every category)
        #[arg(long, short)]
        category: Option<String>,
        /// Sort column: name, price, stock or created
        #[arg(long, default_value = "created")]
        sort: ProductSortField,
        /// Sort direction; defaults to newest first for created, ascending otherwise
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Create a product
    Add(ProductFields),
    /// Replace a product's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, default_value_t = 0)]
    pub stock: i64,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub category_id: Option<String>,
    /// active, draft or out_of_stock
    #[arg(long)]
    pub status: Option<ProductStatus>,
    /// Image file to upload
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List categories
    List {
        /// Match against name or description
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a category
    Add(CategoryFields),
    /// Rename or redescribe a category
    Update {
        id: String,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Image file to upload
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// List orders
    List {
        /// all, processing, shipped, delivered or cancelled
        #[arg(long, default_value = "all")]
        status: OrderFilter,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Mark an order shipped
    Ship {
        id: String,
        #[arg(long)]
        tracking: String,
    },
    /// Mark an order delivered
    Deliver { id: String },
    /// Cancel an order
    Cancel {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Delete an order
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ShopCommand {
    /// Show the full profile
    Show,
    /// Change profile fields; omitted fields keep their current value
    Update(ShopFields),
}

#[derive(Args, Debug)]
pub struct ShopFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub owner_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Profile image to upload
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::build(&cli.global)?;
    match cli.command {
        Command::Login(args) => commands::login(&ctx, args).await,
        Command::Logout => commands::logout(&ctx),
        Command::Whoami => commands::whoami(&ctx).await,
        Command::Products(cmd) => commands::products(&ctx, cmd).await,
        Command::Categories(cmd) => commands::categories(&ctx, cmd).await,
        Command::Orders(cmd) => commands::orders(&ctx, cmd).await,
        Command::Shop(cmd) => commands::shop(&ctx, cmd).await,
    }
}
