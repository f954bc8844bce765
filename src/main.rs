use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use fileserver_catalog::{catalog, cli, config, error, packages, report, scanner, update};
use catalog::CatalogStore;
use cli::{Cli, Commands};
use config::Config;
use fileserver_common::{extract_identifiers, match_token, matchers, tokenize, Category};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().context("failed to load config")?;
    if let Some(root) = cli.root.clone() {
        config.fileserver_root = root;
    }
    if let Some(storage) = cli.storage.clone() {
        config.storage_dir = storage;
    }

    match cli.command {
        Commands::Register { only_new } => {
            println!("🗂 fileserver-catalog - register\n");

            let mut store = if only_new {
                CatalogStore::load(&config.catalog_file())?.unwrap_or_default()
            } else {
                CatalogStore::new()
            };

            println!("[1/2] Scanning {}...", config.fileserver_root.display());
            let summary = scanner::register_files(&mut store, &config.fileserver_root, only_new, cli.verbose)
                .with_context(|| format!("failed to scan {}", config.fileserver_root.display()))?;
            println!("✔ {} files scanned, {} registered\n", summary.scanned, summary.added);

            println!("[2/2] Saving catalog...");
            save(&store, &config)?;
            println!("\n✅ Registration finished ({} files in catalog)", store.len());
        }

        Commands::Update { doublecheck } => {
            println!("🔄 fileserver-catalog - update (doublecheck: {})\n", doublecheck);
            let mut store = open(&config, cli.verbose)?;
            let rules = update::SkipRules::load(&config).context("failed to read skip rules")?;

            let summary = update::update_entries(&mut store, &rules, doublecheck, cli.verbose);
            save(&store, &config)?;

            println!(
                "✔ Update finished (doublecheck: {}, {:.2}s)",
                doublecheck,
                summary.elapsed.as_secs_f64()
            );
            println!("  {} files in total.", summary.total);
            println!("  {} files were marked to be skipped for upload.", summary.skipped);
            println!("  {} files cannot be found.", summary.missing);
            println!("  {} files were already processed.", summary.processed);
            println!("----");
            println!("  {} files remain to be uploaded.", summary.uploadable());
        }

        Commands::Extensions => {
            let store = open(&config, cli.verbose)?;
            let counts = report::extension_counts(&store)?;
            if cli.verbose {
                println!("All extensions:");
                print_counts(&counts.all);
                println!("Skipped extensions:");
                print_counts(&counts.skipped);
            }
            println!("Used extensions:");
            print_counts(&counts.used);
        }

        Commands::ByExtension { extension, include_skipped } => {
            let store = open(&config, cli.verbose)?;
            let files = report::files_by_extension(&store, &extension, include_skipped);
            print_list(&files);
            println!("{} files with extension {}.", files.len(), extension.to_lowercase());
        }

        Commands::WithoutDb { include_skipped } => {
            let store = open(&config, cli.verbose)?;
            let files = report::files_without_db_connection(&store, include_skipped);
            print_list(&files);
            println!("{} files have no database connection.", files.len());
        }

        Commands::Unassigned { include_skipped } => {
            let store = open(&config, cli.verbose)?;
            let files = report::unassigned_files(&store, include_skipped);
            print_list(&files);
            println!(
                "{} files have no database connection and are not part of any package.",
                files.len()
            );
        }

        Commands::UnassignedFolders { include_skipped } => {
            let store = open(&config, cli.verbose)?;
            let folders = report::unassigned_folders(&store, include_skipped);
            print_list(&folders);
            println!(
                "Files in {} folders have no database connection and are not part of any package.",
                folders.len()
            );
        }

        Commands::Related { category, value } => {
            let store = open(&config, cli.verbose)?;
            let files = report::related_files(&store, &category, &value)?;
            print_list(&files);
            println!("{} files relate to {} {}.", files.len(), category, value);
        }

        Commands::AddPackage { folder, name, recursive } => {
            let mut store = open(&config, cli.verbose)?;
            let tagged = packages::add_folder_to_package(&mut store, &folder, &name, recursive);
            save(&store, &config)?;
            println!(
                "✔ Added package {} to {} files (recursive: {}).",
                name.to_lowercase(),
                tagged,
                recursive
            );
        }

        Commands::ByPackage { name, include_skipped } => {
            let store = open(&config, cli.verbose)?;
            let files = packages::files_by_package(&store, &name, include_skipped);
            print_list(&files);
            println!("{} files have been found for package {}.", files.len(), name.to_lowercase());
        }

        Commands::Packages => {
            let store = open(&config, cli.verbose)?;
            let names = packages::list_packages(&store);
            print_list(&names);
            println!("{} different packages have been found.", names.len());
        }

        Commands::RemoveLost { yes } => {
            let mut store = open(&config, cli.verbose)?;
            let lost = report::numbers(&store).lost;
            if lost == 0 {
                println!("✓ No lost files in the catalog");
                return Ok(());
            }

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Remove {} lost files from the catalog?", lost))
                    .default(false)
                    .interact()
                    .map_err(|e| error::CatalogError::Prompt(e.to_string()))?;

            if confirmed {
                let removed = store.remove_lost();
                if cli.verbose {
                    print_list(&removed);
                }
                save(&store, &config)?;
                println!("✔ Removed {} entries", removed.len());
            } else {
                println!("Nothing removed");
            }
        }

        Commands::Numbers => {
            let store = open(&config, cli.verbose)?;
            let numbers = report::numbers(&store);
            println!("Aggregation of numbers has finished:");
            println!("- Elements in total: {}", numbers.total);
            println!(
                "- Elements skipped: {}   -   unskipped: {}",
                numbers.skipped,
                numbers.unskipped()
            );
            println!(
                "- Elements lost: {}   -   still there: {}",
                numbers.lost,
                numbers.still_there()
            );
            println!(
                "- Elements processed: {}   -   unprocessed: {}",
                numbers.processed,
                numbers.unprocessed()
            );
        }

        Commands::Test { path } => {
            if cli.verbose {
                for token in tokenize(&path) {
                    for (category, value) in match_token(&token) {
                        let rule = match category {
                            Category::Find => matchers::find_rule(&token),
                            Category::Zo => matchers::zo_rule(&token),
                            _ => None,
                        };
                        match rule {
                            Some(rule) => println!("  {} → {}: {} ({})", token, category, value, rule),
                            None => println!("  {} → {}: {}", token, category, value),
                        }
                    }
                }
            }
            let identifiers = extract_identifiers(&path);
            println!("{}", serde_json::to_string_pretty(&identifiers)?);
        }

        Commands::Config { set_root, set_storage, show } => {
            if let Some(root) = set_root {
                config.set_root(root)?;
                println!("✔ Fileserver root set");
            }

            if let Some(storage) = set_storage {
                config.set_storage(storage)?;
                println!("✔ Storage folder set");
            }

            if show {
                println!("Config:");
                println!("  Fileserver root: {}", config.fileserver_root.display());
                println!("  Storage: {}", config.storage_dir.display());
                println!("  Catalog file: {}", config.catalog_file().display());
            }
        }
    }

    Ok(())
}

fn open(config: &Config, verbose: bool) -> anyhow::Result<CatalogStore> {
    catalog::open_catalog(config, verbose)
        .with_context(|| format!("failed to open catalog {}", config.catalog_file().display()))
}

fn save(store: &CatalogStore, config: &Config) -> anyhow::Result<()> {
    let archived = store
        .save(&config.storage_dir, &config.catalog_name)
        .with_context(|| format!("failed to save catalog to {}", config.catalog_file().display()))?;
    if let Some(archived) = archived {
        println!("  previous catalog archived: {}", archived.display());
    }
    println!("✔ Catalog saved: {}", config.catalog_file().display());
    Ok(())
}

fn print_list(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_counts(counts: &std::collections::BTreeMap<String, usize>) {
    for (extension, count) in counts {
        println!("  {}: {}", extension, count);
    }
}
