use clap::{Parser, Subcommand};
use log::LevelFilter;
use presite::render::CommandRenderer;
use presite::wp::WpClient;
use presite::{cache::FetchCache, config, feed, prerender, robots, sitemap};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

/// Shared flags for commands that fetch from the content API.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the fetch cache — hit the content API for every request
    #[arg(long)]
    no_cache: bool,
}

/// Flags for commands that run the renderer.
#[derive(clap::Args)]
struct RenderArgs {
    #[command(flatten)]
    cache: CacheArgs,

    /// Path to the SSR renderer executable
    #[arg(long, default_value = "dist-ssr/render")]
    renderer: PathBuf,

    /// Page shell template (defaults to <output>/index.html, the client
    /// build's entry document)
    #[arg(long)]
    template: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "presite")]
#[command(about = "Prerenderer and SEO artifact generator for WordPress-backed SPAs")]
#[command(long_about = "\
Prerenderer and SEO artifact generator for WordPress-backed SPAs

Runs after the client build and materializes what crawlers need before
hydration: a prerendered HTML document per route, sitemap.xml, rss.xml,
and robots.txt.

Routes are discovered from the WordPress REST API (posts, categories,
pages) on top of the fixed set '/' and '/blog'. A failing or unreachable
backend degrades the route set instead of failing the build.

The renderer is the client app's SSR artifact: an executable invoked with
a route argument that prints {\"markup\": ..., \"head\": ...} as JSON.
Building without it is an error; everything else is best-effort.

Set ORIGIN to override the canonical base URL for preview deploys.")]
#[command(version)]
struct Cli {
    /// Settings file
    #[arg(long, default_value = "presite.toml", global = true)]
    settings: PathBuf,

    /// Output directory (the client build output)
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the durable fetch-cache tier
    #[arg(long, default_value = ".presite-cache", global = true)]
    cache_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prerender every discovered route into the output directory
    Prerender(RenderArgs),
    /// Generate sitemap.xml
    Sitemap(CacheArgs),
    /// Generate rss.xml
    Rss(CacheArgs),
    /// Generate robots.txt
    Robots,
    /// Run the full pipeline: prerender + sitemap + rss + robots
    Build(RenderArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    let cli = Cli::parse();

    let settings = config::Settings::load(&cli.settings)?;
    let origin = settings.origin();

    match &cli.command {
        Command::Prerender(args) => {
            let mut client = make_client(&cli, &settings, &origin, &args.cache)?;
            run_prerender(&cli, &mut client, args)?;
        }
        Command::Sitemap(cache_args) => {
            let mut client = make_client(&cli, &settings, &origin, cache_args)?;
            write_artifact(&cli.output, "sitemap.xml", &sitemap::generate(&mut client, &origin))?;
            println!("Sitemap generated");
        }
        Command::Rss(cache_args) => {
            let mut client = make_client(&cli, &settings, &origin, cache_args)?;
            write_artifact(
                &cli.output,
                "rss.xml",
                &feed::generate(&mut client, &settings, &origin),
            )?;
            println!("RSS generated");
        }
        Command::Robots => {
            write_artifact(
                &cli.output,
                "robots.txt",
                &robots::generate(&origin, &settings.wp_base_path),
            )?;
            println!("robots.txt generated");
        }
        Command::Build(args) => {
            let mut client = make_client(&cli, &settings, &origin, &args.cache)?;

            println!("==> Prerendering routes");
            run_prerender(&cli, &mut client, args)?;

            println!("==> Generating SEO artifacts");
            write_artifact(&cli.output, "sitemap.xml", &sitemap::generate(&mut client, &origin))?;
            write_artifact(
                &cli.output,
                "rss.xml",
                &feed::generate(&mut client, &settings, &origin),
            )?;
            write_artifact(
                &cli.output,
                "robots.txt",
                &robots::generate(&origin, &settings.wp_base_path),
            )?;

            println!("==> Build complete: {}", cli.output.display());
        }
    }

    Ok(())
}

/// Construct the API client for this run. The cache instance lives and
/// dies with the run.
fn make_client(
    cli: &Cli,
    settings: &config::Settings,
    origin: &str,
    cache_args: &CacheArgs,
) -> Result<WpClient, reqwest::Error> {
    let cache = if cache_args.no_cache {
        FetchCache::disabled()
    } else {
        FetchCache::new(Some(cli.cache_dir.clone()))
    };
    WpClient::new(settings.api_base(origin), cache)
}

/// Prerender all routes. Fails fast — before any route is processed —
/// when the renderer artifact is missing or the template has no markers.
fn run_prerender(
    cli: &Cli,
    client: &mut WpClient,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = CommandRenderer::new(&args.renderer)?;
    let template_path = args
        .template
        .clone()
        .unwrap_or_else(|| cli.output.join("index.html"));
    // Read fully before the loop: the root route overwrites the template
    // file itself.
    let template = prerender::load_template(&template_path)?;

    let summary = prerender::run(client, &renderer, &template, &cli.output);
    println!("Prerender: {summary}");
    Ok(())
}

fn write_artifact(output_dir: &std::path::Path, name: &str, contents: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(output_dir)?;
    std::fs::write(output_dir.join(name), contents)
}
