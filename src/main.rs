use mnist_idx::mnist_dataset::Split;
use mnist_idx::source::LocalSource;
use mnist_idx::{DatasetConfig, DatasetLoader};

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// JSON file with loader settings; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    /// Fail instead of downloading missing files
    #[arg(long)]
    no_download: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Test,
}

impl From<SplitArg> for Split {
    fn from(split: SplitArg) -> Self {
        match split {
            SplitArg::Train => Split::Train,
            SplitArg::Test => Split::Test,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load both splits and print their sizes and label distribution
    Summary {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        train_count: Option<usize>,
        #[arg(long)]
        test_count: Option<usize>,
    },
    /// Print one sample as text along with its label
    Show {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = SplitArg::Train)]
        split: SplitArg,
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Write the raw pixel bytes of one sample to a file
    Extract {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = SplitArg::Test)]
        split: SplitArg,
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mnist_idx=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary {
            data,
            train_count,
            test_count,
        } => summary(data, train_count, test_count),
        Commands::Show { data, split, index } => show(data, split.into(), index),
        Commands::Extract {
            data,
            split,
            index,
            output,
        } => extract(data, split.into(), index, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(args: &DataArgs) -> Result<DatasetConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => DatasetConfig::from_json_file(path)?,
        None => DatasetConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn build_loader(
    args: &DataArgs,
) -> Result<DatasetLoader<LocalSource>, Box<dyn std::error::Error>> {
    let config = build_config(args)?;
    Ok(DatasetLoader::from_config(config, !args.no_download))
}

fn summary(
    args: DataArgs,
    train_count: Option<usize>,
    test_count: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = build_config(&args)?;
    config.train_count = train_count.or(config.train_count);
    config.test_count = test_count.or(config.test_count);
    let loader = DatasetLoader::from_config(config, !args.no_download);

    let (train, test) = loader.load_mnist()?;
    for (split, dataset) in [(Split::Train, &train), (Split::Test, &test)] {
        let name = split.as_str().to_uppercase();
        println!(
            "[{}] len: {} (published files hold {})",
            name,
            dataset.len(),
            split.standard_len()
        );
        println!("[{}] labels: {:?}", name, dataset.label_counts());
    }
    Ok(())
}

fn show(args: DataArgs, split: Split, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let loader = build_loader(&args)?;
    let (image, label) = loader.load_sample(split, index)?;

    print!("{}", image.render_ascii(loader.config().shape()));
    println!("Image Label: {}", label.value());
    println!("One-hot: {:?}", label.one_hot()?);
    Ok(())
}

fn extract(
    args: DataArgs,
    split: Split,
    index: usize,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = build_loader(&args)?;
    let (image, label) = loader.load_sample(split, index)?;

    fs::write(&output, image.pixels())?;
    println!(
        "Wrote {} bytes (label {}) to {}",
        image.len(),
        label.value(),
        output.display()
    );
    Ok(())
}
