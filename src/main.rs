use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use meal_planning::{today_index, CalorieBudget, FilterSet, PlanMode, WeekPlan};
use mealmuse::app::App;
use mealmuse::config::Config;
use preferences::{FileBackend, PreferenceStore, StorageBackend};
use recipe::{Catalog, MealType};
use shopping::ShoppingListService;

/// mealmuse - meal suggestions and weekly planning
#[derive(Parser)]
#[command(name = "mealmuse")]
#[command(about = "Recipe suggestions, favorites and calorie-budgeted weekly plans", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest one recipe for a meal, avoiding recent repeats
    Suggest {
        /// Meal category: breakfast, lunch or dinner
        #[arg(long)]
        meal: MealType,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Generate a 7-day meal plan and reserve it in history
    Plan {
        /// Weekly calorie limit (overrides config file)
        #[arg(long)]
        weekly_calories: Option<u32>,

        /// Keep each slot under its per-meal calorie cap
        #[arg(long)]
        calorie_limited: bool,

        /// Print the derived shopping list after the plan
        #[arg(long)]
        shopping_list: bool,

        /// Seed for reproducible plans
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Manage favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
    /// Print a shareable text block for a recipe
    Share {
        recipe_id: String,
    },
    /// Show the loaded catalog per meal category
    Catalog,
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorite recipes
    List,
    /// Add the recipe if absent, remove it if present
    Toggle { recipe_id: String },
}

#[derive(Args, Debug, Clone, Copy, Default)]
struct FilterArgs {
    /// Only vegetarian recipes
    #[arg(long)]
    vegetarian: bool,

    /// Only vegan recipes (implies --vegetarian)
    #[arg(long)]
    vegan: bool,

    /// Only gluten-free recipes
    #[arg(long)]
    gluten_free: bool,

    /// Only lactose-free recipes
    #[arg(long)]
    lactose_free: bool,

    /// Only recipes ready in 20 minutes or less
    #[arg(long)]
    quick: bool,

    /// Only recipes in the two cheapest cost tiers
    #[arg(long)]
    budget: bool,
}

impl FilterArgs {
    fn to_filter_set(self) -> FilterSet {
        let mut filters = FilterSet::default();
        filters.set_vegetarian(self.vegetarian);
        filters.set_vegan(self.vegan);
        filters.gluten_free = self.gluten_free;
        filters.lactose_free = self.lactose_free;
        filters.quick_only = self.quick;
        filters.budget_only = self.budget;
        filters
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealmuse::observability::init_observability(&config.observability.log_level)?;

    let catalog = Catalog::shared()?;
    let backend = match &config.storage.data_dir {
        Some(dir) => FileBackend::new(dir),
        None => FileBackend::in_default_location()?,
    };
    let app = App::new(catalog, PreferenceStore::new(backend));
    let today = today_index();

    match cli.command {
        Commands::Suggest { meal, filters } => {
            suggest_command(&app, meal, filters.to_filter_set(), today).await
        }
        Commands::Plan {
            weekly_calories,
            calorie_limited,
            shopping_list,
            seed,
            filters,
        } => {
            let weekly = weekly_calories.unwrap_or(config.planner.weekly_calories);
            let mode = if calorie_limited {
                PlanMode::CalorieCapped
            } else {
                PlanMode::Unconstrained
            };
            plan_command(
                &app,
                filters.to_filter_set(),
                weekly,
                mode,
                shopping_list,
                seed,
                today,
            )
            .await
        }
        Commands::Favorites { action } => match action {
            FavoritesCommand::List => favorites_list_command(&app).await,
            FavoritesCommand::Toggle { recipe_id } => {
                favorites_toggle_command(&app, &recipe_id).await
            }
        },
        Commands::Share { recipe_id } => share_command(&app, &recipe_id),
        Commands::Catalog => catalog_command(&app),
    }
}

#[tracing::instrument(skip(app))]
async fn suggest_command<B: StorageBackend>(
    app: &App<'_, B>,
    meal: MealType,
    filters: FilterSet,
    today: i64,
) -> Result<()> {
    let mut rng = rand::rng();
    match app.suggest(meal, &filters, today, &mut rng).await? {
        Some(recipe) => {
            let minutes = recipe
                .minutes
                .map(|m| format!(", {} min", m))
                .unwrap_or_default();
            println!("{} ({} kcal{})", recipe.name, recipe.calories, minutes);
            if let Some(note) = &recipe.note {
                println!("{}", note);
            }
        }
        None => println!("No {} recipe available with the current filters.", meal),
    }
    Ok(())
}

#[tracing::instrument(skip(app))]
#[allow(clippy::too_many_arguments)]
async fn plan_command<B: StorageBackend>(
    app: &App<'_, B>,
    filters: FilterSet,
    weekly: u32,
    mode: PlanMode,
    with_shopping_list: bool,
    seed: Option<u64>,
    today: i64,
) -> Result<()> {
    let budget = CalorieBudget::new(weekly)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let plan = app.generate_plan(&filters, &budget, mode, today, &mut rng).await?;

    println!(
        "Weekly plan: {} kcal/week, {} kcal/day target (caps {}/{}/{})",
        budget.weekly,
        budget.daily_target,
        budget.breakfast_cap,
        budget.lunch_cap,
        budget.dinner_cap
    );
    println!("{}", render_plan(&plan));

    if with_shopping_list {
        let items = ShoppingListService::build(&plan);
        println!();
        println!("Shopping list:");
        println!("{}", ShoppingListService::render(&items));
    }
    Ok(())
}

async fn favorites_list_command<B: StorageBackend>(app: &App<'_, B>) -> Result<()> {
    let entries = app.favorites().await;
    if entries.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for entry in entries {
        match entry.name {
            Some(name) => println!("{:<20} {}", entry.id, name),
            None => println!("{:<20} (not in catalog)", entry.id),
        }
    }
    Ok(())
}

async fn favorites_toggle_command<B: StorageBackend>(
    app: &App<'_, B>,
    recipe_id: &str,
) -> Result<()> {
    let display = app
        .catalog()
        .get(recipe_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| recipe_id.to_string());

    if app.toggle_favorite(recipe_id).await? {
        println!("Added '{}' to favorites.", display);
    } else {
        println!("Removed '{}' from favorites.", display);
    }
    Ok(())
}

fn share_command<B: StorageBackend>(app: &App<'_, B>, recipe_id: &str) -> Result<()> {
    match app.share_text(recipe_id) {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => anyhow::bail!("unknown recipe id '{}'", recipe_id),
    }
}

fn catalog_command<B: StorageBackend>(app: &App<'_, B>) -> Result<()> {
    let catalog = app.catalog();
    for meal in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
        let natural: Vec<_> = catalog.by_meal(meal).filter(|r| !r.synthetic).collect();
        let total = catalog.pool_size(meal);
        println!(
            "{}: {} recipes ({} from the dataset)",
            meal,
            total,
            natural.len()
        );
        for recipe in &natural {
            println!("  {:<20} {} ({} kcal)", recipe.id, recipe.name, recipe.calories);
        }
    }
    Ok(())
}

fn render_plan(plan: &WeekPlan) -> String {
    let mut lines = Vec::new();
    let mut current_day = None;
    for slot in plan.slots() {
        if current_day != Some(slot.day) {
            current_day = Some(slot.day);
            lines.push(slot.day.to_string());
        }
        let cell = match &slot.recipe {
            Some(recipe) => format!("{} ({} kcal)", recipe.name, recipe.calories),
            None => "(nothing available)".to_string(),
        };
        lines.push(format!("  {:<10} {}", slot.meal.as_ref(), cell));
    }
    lines.join("\n")
}
