//! Clever Girl - Compatibility Demo
//!
//! Builds stand-in host objects shaped like a chosen host release, runs every
//! compatibility operation against them, then lets you manage a companion's
//! honed attributes from the console.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clever_girl::attributes::{Attribute, HoningAttributes, OptionList, StatBlock, StatSheet, AP};
use clever_girl::compat::{CompatibilityFacade, Journal};
use clever_girl::core::error::Result;
use clever_girl::core::{CompatConfig, HostHandle, ValueType};
use clever_girl::host::{DynamicObject, HostObject, HostType, SlotKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(name = "clever-girl")]
#[command(about = "Exercise the host compatibility adapter against a simulated host release")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force debug diagnostics on
    #[arg(long, short = 'd')]
    debug: bool,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Host release to simulate: 2.0.204 (old names) or 2.0.206 (new names)
    #[arg(long, default_value = "2.0.206")]
    host_version: String,

    /// Directory of JSON host type descriptors to use instead of the built-in ones
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// Manage attributes interactively instead of with a fixed script
    #[arg(long, short = 'i')]
    interactive: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let mut loaded = CompatConfig::load(path)?;
            loaded.apply_env();
            loaded
        }
        None => CompatConfig::from_env(),
    };
    if args.debug {
        config.debug = true;
    }

    let filter = if config.debug {
        "clever_girl=debug".to_string()
    } else {
        config.default_filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    tracing::info!("Clever Girl demo against host {}", args.host_version);

    let release = match &args.shapes {
        Some(dir) => HostRelease::load(dir)?,
        None => HostRelease::builtin(&args.host_version),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut facade = CompatibilityFacade::new(config);

    run_compat_operations(&mut facade, &release, &mut rng);
    run_attribute_management(&args, &mut rng)?;

    println!(
        "\nResolved {} member bindings with {} introspection passes.",
        facade.cache().len(),
        facade.cache().resolutions()
    );
    Ok(())
}

/// Host type descriptors for one simulated host release
struct HostRelease {
    body_part: Arc<HostType>,
    mutation: Arc<HostType>,
    terminal: Arc<HostType>,
}

impl HostRelease {
    fn builtin(version: &str) -> Self {
        let old = release_key(version) < release_key("2.0.206");
        let (primary, selector, credits, subject, selected) = if old {
            ("PreferedPrimary", ValueType::Int, "nCredits", "obj", "nSelected")
        } else {
            ("PreferredPrimary", ValueType::Str, "Credits", "Subject", "Selected")
        };

        let body_part = if old {
            HostType::new("BodyPart", version).with_field(primary, ValueType::Bool)
        } else {
            HostType::new("BodyPart", version).with_readonly_property(primary, ValueType::Bool)
        };

        Self {
            body_part: Arc::new(body_part),
            mutation: Arc::new(
                HostType::new("BaseMutation", version)
                    .with_method("GetVariants", &[], ValueType::List)
                    .with_method("SetVariant", &[selector], ValueType::Unit),
            ),
            terminal: Arc::new(
                HostType::new("CyberneticsTerminal", version)
                    .with_field(credits, ValueType::Int)
                    .with_field(subject, ValueType::Handle)
                    .with_field(selected, ValueType::Int),
            ),
        }
    }

    /// Load `BodyPart.json`, `BaseMutation.json` and `CyberneticsTerminal.json`
    fn load(dir: &std::path::Path) -> Result<Self> {
        let read = |name: &str| -> Result<Arc<HostType>> {
            let content = std::fs::read_to_string(dir.join(format!("{}.json", name)))?;
            Ok(Arc::new(HostType::from_json(&content)?))
        };
        Ok(Self {
            body_part: read("BodyPart")?,
            mutation: read("BaseMutation")?,
            terminal: read("CyberneticsTerminal")?,
        })
    }
}

/// Dotted release number as numeric components; non-numeric parts count as 0
fn release_key(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

struct ConsoleJournal;

impl Journal for ConsoleJournal {
    fn add_accomplishment(&mut self, text: &str, mural_text: &str) {
        println!("  Journal: {} [{}]", text, mural_text);
    }
}

fn run_compat_operations(
    facade: &mut CompatibilityFacade,
    release: &HostRelease,
    rng: &mut ChaCha8Rng,
) {
    println!("\n=== COMPATIBILITY ===");

    let primary_name = release
        .body_part
        .properties
        .iter()
        .chain(&release.body_part.fields)
        .map(|slot| slot.name.clone())
        .next();
    let mut hand = DynamicObject::new(release.body_part.clone());
    if let Some(name) = &primary_name {
        let kind = if release.body_part.field(name).is_some() {
            SlotKind::Field
        } else {
            SlotKind::Property
        };
        hand = hand.with_slot(kind, name, true);
    }
    println!("Preferred primary: {}", facade.preferred_primary_flag(&hand));

    let mut mutation = DynamicObject::new(release.mutation.clone());
    mutation.set_return(
        "GetVariants",
        &[],
        vec!["Horns".to_string(), "Antlers".to_string(), "Casque".to_string()],
    );
    match facade.randomize_mutation_variant(&mut mutation, rng) {
        Some(variant) => println!("Mutation variant: {}", variant),
        None => println!("Mutation variant: unchanged"),
    }

    let mut terminal = DynamicObject::new(release.terminal.clone());
    for slot in release.terminal.fields.iter().filter(|f| f.ty == ValueType::Handle) {
        terminal = terminal.with_slot(SlotKind::Field, &slot.name, HostHandle(7));
    }
    println!("Terminal subject: {:?}", facade.terminal_subject(Some(&terminal as &dyn HostObject)));
    println!("Credits after +5: {:?}", facade.add_credits(&mut terminal, 5));
    println!("Credits after +3: {:?}", facade.add_credits(&mut terminal, 3));
    println!("Selected: {}", facade.terminal_selected(&terminal));

    facade.add_inspired_dish_accomplishment(
        &mut ConsoleJournal,
        "Your companion invented a new dish.",
        "In a moment of inspiration, the companion cooked something new.",
    );
}

/// Reads picks from stdin; an empty line or EOF backs out, unknown keys re-prompt
struct ConsoleMenu;

impl OptionList for ConsoleMenu {
    fn show(&mut self, intro: &str, options: &[String], hotkeys: &[char]) -> Option<usize> {
        println!("\n{}", intro);
        for (option, key) in options.iter().zip(hotkeys) {
            println!("  [{}] {}", key, option);
        }

        loop {
            print!("> ");
            io::stdout().flush().ok()?;

            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line).ok()? == 0 {
                return None;
            }
            match pick_from_line(&line, hotkeys) {
                MenuInput::Back => return None,
                MenuInput::Pick(index) => return Some(index),
                MenuInput::Unknown(key) => println!("No option [{}]; press Enter to finish.", key),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum MenuInput {
    Back,
    Pick(usize),
    Unknown(char),
}

fn pick_from_line(line: &str, hotkeys: &[char]) -> MenuInput {
    let Some(key) = line.trim().chars().next() else {
        return MenuInput::Back;
    };
    match hotkeys.iter().position(|k| *k == key) {
        Some(index) => MenuInput::Pick(index),
        None => MenuInput::Unknown(key),
    }
}

/// Toggles Strength and Ego, then backs out
struct ScriptedMenu(Vec<usize>);

impl OptionList for ScriptedMenu {
    fn show(&mut self, _intro: &str, options: &[String], _hotkeys: &[char]) -> Option<usize> {
        for option in options {
            tracing::debug!("  {}", option);
        }
        self.0.pop()
    }
}

fn run_attribute_management(args: &Args, rng: &mut ChaCha8Rng) -> Result<()> {
    println!("\n=== ATTRIBUTES ===");

    let mut stats = Attribute::ALL
        .iter()
        .fold(StatSheet::new().with_base(AP, 3), |sheet, attr| sheet.with_base(attr.name(), 16));
    let mut honing = HoningAttributes::new();

    let outcome = if args.interactive {
        honing.manage("your companion", &mut stats, &mut ConsoleMenu, rng)
    } else {
        honing.manage("your companion", &mut stats, &mut ScriptedMenu(vec![5, 0]), rng)
    };
    if let Some(point) = &outcome.spent {
        println!("{}", point.message);
    }
    if !outcome.keep {
        println!("Nothing to hone; the companion stops listening for attribute points.");
        return Ok(());
    }

    while let Some(point) = honing.on_stat_change(AP, "your companion", &mut stats, rng) {
        println!("{}", point.message);
    }
    for attr in Attribute::ALL {
        let value = stats.value(attr.name()).unwrap_or(0);
        println!("  {:<12} {:>3} {}", attr.name(), value, attr.describe(value));
    }
    println!("  Honing: {:?}", honing.iter().collect::<Vec<_>>());
    println!("  Unspent AP: {}", stats.value(AP).unwrap_or(0));
    Ok(())
}
