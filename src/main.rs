use clap::Parser;
use env_logger::{Builder, Env};
use seqcompare_tools::cli::{self, Commands};
use seqcompare_tools::commands;
use seqcompare_tools::config::AnalysisConfig;

fn run(args: cli::Args) -> anyhow::Result<()> {
    let mut config = AnalysisConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Entropy { files, format, output } => {
            output.apply(&mut config);
            commands::entropy::run(files, format, &config)
        }
        Commands::Similarity {
            first,
            second,
            format,
            matching,
            sampling,
            output,
        } => {
            matching.apply(&mut config);
            sampling.apply(&mut config);
            output.apply(&mut config);
            commands::similarity::run(&first, &second, format, &config)
        }
        Commands::CountKmers { file, k, format, output } => {
            output.apply(&mut config);
            commands::count_kmers::run(&file, k, format, &config)
        }
        Commands::CompareKmers {
            first,
            second,
            significance,
            output,
        } => {
            significance.apply(&mut config);
            output.apply(&mut config);
            commands::compare_kmers::run(&first, &second, &config)
        }
        Commands::Proportions {
            table,
            significance,
            output,
        } => {
            significance.apply(&mut config);
            output.apply(&mut config);
            commands::proportions::run(&table, &config)
        }
        Commands::Unmapped { reads, mapped, output } => {
            output.apply(&mut config);
            commands::unmapped::run(&reads, &mapped, &config)
        }
        Commands::InitConfig => commands::init_config::run(&config),
    }
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
