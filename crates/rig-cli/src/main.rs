use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rig_app::App;
use rig_core::{Rule, RuleId, Severity};
use rig_store::RuleStore;

#[derive(Parser)]
#[command(name = "rig", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize rigcheck here (creates .rigcheck/, config, db, default rules)
    Init,

    /// List compatibility rules
    Rules {
        /// Include inactive rules
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Enable a rule
    RuleEnable {
        #[arg(long)]
        id: String,
    },

    /// Disable a rule
    RuleDisable {
        #[arg(long)]
        id: String,
    },

    /// Change a rule's severity (error | warning)
    RuleSeverity {
        #[arg(long)]
        id: String,
        #[arg(long)]
        severity: String,
    },

    /// Seed rules from a pack file
    Seed {
        #[arg(long)]
        pack: String,
    },

    /// Check a part selection file against the active rules
    Check {
        #[arg(long)]
        selection: String,
    },
}

fn print_rule(rule: &Rule) {
    let status = if rule.is_active { "active" } else { "inactive" };
    println!(
        "#{} [{}] [{}] {}",
        rule.rule_number,
        rule.severity.as_str(),
        status,
        rule.name
    );
    if !rule.description.is_empty() {
        println!("    {}", rule.description);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            let report = App::init_dir(&root)?;
            println!(
                "Initialized rigcheck in {} ({} rules seeded from {}, pack {})",
                root.display(),
                report.inserted,
                report.pack,
                &report.hash[..12]
            );
        }
        Command::Rules { all } => {
            let app = App::open(root)?;
            let rules = app.store.list(!all)?;
            println!("Rules: {}", rules.len());
            for rule in &rules {
                print_rule(rule);
            }
        }
        Command::RuleEnable { id } => {
            let app = App::open(root)?;
            let rule = app.admin().set_active(&RuleId::from_str(id), true)?;
            print_rule(&rule);
        }
        Command::RuleDisable { id } => {
            let app = App::open(root)?;
            let rule = app.admin().set_active(&RuleId::from_str(id), false)?;
            print_rule(&rule);
        }
        Command::RuleSeverity { id, severity } => {
            let app = App::open(root)?;
            let rule = app.admin().set_severity(&RuleId::from_str(id), &severity)?;
            print_rule(&rule);
        }
        Command::Seed { pack } => {
            let app = App::open(root)?;
            let report = app.seed_pack_file(std::path::Path::new(&pack))?;
            println!(
                "Seeded {} rule(s) from {} ({} already present, pack {})",
                report.inserted,
                report.pack,
                report.skipped,
                &report.hash[..12]
            );
        }
        Command::Check { selection } => {
            let app = App::open(root)?;
            let issues = app.check_file(std::path::Path::new(&selection))?;

            let errors: Vec<_> = issues.iter().filter(|i| i.severity == Severity::Error).collect();
            let warnings: Vec<_> =
                issues.iter().filter(|i| i.severity == Severity::Warning).collect();

            if issues.is_empty() {
                println!("All parts are compatible!");
            } else {
                if !errors.is_empty() {
                    println!("Errors ({}):", errors.len());
                    for issue in &errors {
                        println!("- {}", issue.message);
                    }
                }
                if !warnings.is_empty() {
                    println!("Warnings ({}):", warnings.len());
                    for issue in &warnings {
                        println!("- {}", issue.message);
                    }
                }
            }
        }
    }

    Ok(())
}
