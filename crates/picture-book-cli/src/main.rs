use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use picture_book::{BookOptions, ContentOrder, FontChoice, PaperSize, Quality};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "picture-book", about = "Chronological picture book builder", version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the picture book PDF
    Build(BookArgs),

    /// Show the page profile and the matched pictures without building
    Plan(BookArgs),

    /// Write the default options to a JSON file for editing
    InitConfig {
        /// Output JSON file
        output: PathBuf,
    },
}

#[derive(Args)]
struct BookArgs {
    /// Options JSON file (see `init-config`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the numbered pictures
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory the book is written to (defaults to the input directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Paper size: A4, A5 or A6 (anything else means A4)
    #[arg(long)]
    paper: Option<String>,

    /// Quality: H (300dpi), M (150dpi) or L (75dpi)
    #[arg(long)]
    quality: Option<String>,

    /// Front matter font: Helvetica, Times-Roman or Courier
    #[arg(long)]
    font: Option<String>,

    /// Leave out the title, copyright and preface pages
    #[arg(long)]
    no_front_matter: bool,

    /// Order of the content pages
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    FileName,
    Selection,
}

impl From<OrderArg> for ContentOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::FileName => Self::FileName,
            OrderArg::Selection => Self::Selection,
        }
    }
}

impl BookArgs {
    async fn into_options(self) -> Result<BookOptions> {
        let mut options = match &self.config {
            Some(path) => BookOptions::load(path)
                .await
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => BookOptions::default(),
        };

        if let Some(dir) = self.input_dir {
            options.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            options.output_dir = Some(dir);
        }
        if let Some(paper) = self.paper {
            options.paper_size = PaperSize::from_choice(&paper);
        }
        if let Some(quality) = self.quality {
            options.quality = Quality::from_choice(&quality);
        }
        if let Some(font) = self.font {
            options.font = FontChoice::from_choice(&font);
        }
        if self.no_front_matter {
            options.front_matter = false;
        }
        if let Some(order) = self.order {
            options.content_order = order.into();
        }

        Ok(options)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::ConsoleLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Build(args) => {
            let options = args.into_options().await?;
            println!("### Chron Pictures Book builder ###");
            let report = picture_book::build_book(&options)
                .await
                .context("building picture book")?;
            println!(
                "Done! {} pages ({} pictures) → {}",
                report.total_pages,
                report.content_pages,
                report.output_path.display()
            );
        }

        Commands::Plan(args) => {
            let options = args.into_options().await?;
            let plan = picture_book::plan_book(&options).await?;
            let (width_mm, height_mm) = plan.profile.dimensions_mm();
            println!("Book plan:");
            println!(
                "  Paper: {} ({} x {} mm, {:.2} x {:.2} pt)",
                plan.profile.paper.name(),
                width_mm,
                height_mm,
                plan.profile.width_pt,
                plan.profile.height_pt
            );
            println!(
                "  Pictures: {} x {} px ({} dpi)",
                plan.profile.pixel_width,
                plan.profile.pixel_height,
                plan.profile.quality.dpi()
            );
            println!("  Front matter: {}", if plan.front_matter { "yes" } else { "no" });
            println!(
                "  Matched {} files for {} selections:",
                plan.images.len(),
                options.selection.len()
            );
            for image in &plan.images {
                println!("    {}", image.display());
            }
            println!("  Output: {}", plan.output_path.display());
        }

        Commands::InitConfig { output } => {
            BookOptions::default()
                .save(&output)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Default options → {}", output.display());
        }
    }

    Ok(())
}
