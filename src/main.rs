use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use recipe_card::{
    prompts, AppConfig, CardRenderer, Catalog, Image, OpenAiClient, RecipeGenerator,
    RecipeRequest, RetryPolicy,
};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "recipe-card")]
#[command(about = "Generate recipes and print them onto cards", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used for anything it leaves out
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the model for a recipe and print it onto a card
    Generate(GenerateArgs),
    /// Print existing text onto a card, without contacting any model
    Render {
        /// File to read the text from (default: stdin)
        input: Option<PathBuf>,
        /// Where to write the card
        #[arg(short, long, default_value = "recipe.pdf")]
        out: PathBuf,
    },
    /// List the predefined cuisines, ingredients and dietary preferences
    Options,
}

#[derive(Args)]
struct GenerateArgs {
    /// A cuisine to cook in (repeatable)
    #[arg(long = "cuisine")]
    cuisines: Vec<String>,
    /// An ingredient to include (repeatable)
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,
    /// A dietary preference to respect (repeatable)
    #[arg(long = "preference")]
    preferences: Vec<String>,
    /// A cuisine not in the predefined list
    #[arg(long)]
    custom_cuisine: Option<String>,
    /// An ingredient not in the predefined list
    #[arg(long)]
    custom_ingredient: Option<String>,
    /// A dietary preference not in the predefined list
    #[arg(long)]
    custom_preference: Option<String>,
    #[arg(long, default_value_t = 4)]
    servings: u32,
    /// Where to write the card
    #[arg(short, long, default_value = "recipe.pdf")]
    out: PathBuf,
    /// Download the generated picture and add it to the PDF as a second page
    #[arg(long)]
    illustrate: bool,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Generate(args) => generate(&config, args),
        Commands::Render { input, out } => render(&config, input.as_deref(), &out),
        Commands::Options => {
            options();
            Ok(())
        }
    }
}

fn generate(config: &AppConfig, args: GenerateArgs) -> Result<()> {
    let mut catalog = Catalog::default();
    let mut request = RecipeRequest {
        cuisines: args.cuisines,
        ingredients: args.ingredients,
        preferences: args.preferences,
        servings: args.servings,
    };
    if let Some(cuisine) = &args.custom_cuisine {
        catalog.custom_cuisine(&mut request, cuisine);
    }
    if let Some(ingredient) = &args.custom_ingredient {
        catalog.custom_ingredient(&mut request, ingredient);
    }
    if let Some(preference) = &args.custom_preference {
        catalog.custom_preference(&mut request, preference);
    }

    let client = OpenAiClient::new(config.openai.clone(), args.openai_api_key);
    let generator = RecipeGenerator::new(client, RetryPolicy::from(&config.retry));
    let recipe = match generator.generate(&request) {
        Ok(recipe) => recipe,
        Err(e) => {
            eprintln!("{}", prompts::ERROR_MESSAGE);
            return Err(e).context("recipe generation failed");
        }
    };

    println!("{}", recipe.summary);
    if let Some(url) = &recipe.image_url {
        println!("\nImage: {url}");
    }

    let renderer = CardRenderer::new(&config.card).context("failed to prepare the card")?;
    let rendered = renderer.render(&recipe.summary)?;

    let illustration = match (&recipe.image_url, args.illustrate) {
        (Some(url), true) => match generator
            .model()
            .download(url)
            .map_err(recipe_card::Error::from)
            .and_then(|bytes| Image::new_from_memory(&bytes))
        {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("leaving the picture out of the PDF: {e}");
                None
            }
        },
        _ => None,
    };

    write(&renderer, rendered.surface, illustration, &args.out)
}

fn render(config: &AppConfig, input: Option<&Path>, out: &Path) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };

    let renderer = CardRenderer::new(&config.card).context("failed to prepare the card")?;
    let rendered = renderer.render(&text)?;
    write(&renderer, rendered.surface, None, out)
}

fn write(
    renderer: &CardRenderer,
    card: image::RgbaImage,
    illustration: Option<Image>,
    out: &Path,
) -> Result<()> {
    let file =
        File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    renderer.write_pdf(card, illustration, BufWriter::new(file))?;
    info!("wrote {}", out.display());
    Ok(())
}

fn options() {
    let catalog = Catalog::default();
    for (heading, items) in [
        ("Cuisines", &catalog.cuisines),
        ("Ingredients", &catalog.ingredients),
        ("Dietary preferences", &catalog.preferences),
    ] {
        println!("{heading}:");
        for item in items {
            println!("  {item}");
        }
    }
}
