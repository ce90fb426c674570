//! Command-line interface.

use crate::error::{ErrorKind, Result};
use crate::output::{LanguagesText, RevealText, TreeText};
use crate::source;
use clap::{ArgAction, Args, Parser, Subcommand};
use exn::ResultExt;
use mediacenter_catalog::{Catalog, GroupKey, Policy, Selection, device_language, initial_selection};
use mediacenter_config::Config;
use mediacenter_manifest::models::{LanguageCode, LanguageTable};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code when `locate` finds nothing.
const NOT_FOUND: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mediacenter", version, about = "Browse a language-aware media catalog")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Manifest file, overriding `sources.manifest`
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Category metadata file, overriding `sources.categories`
    #[arg(long, global = true, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog tree for a language selection
    Tree(TreeArgs),
    /// List the selectable languages
    Languages {
        /// Device locale, e.g. de-AT; its language is listed first
        #[arg(long, value_name = "LOCALE")]
        device_lang: Option<String>,
    },
    /// Show the nodes that must be expanded to reveal a file
    Locate {
        hash: String,
        /// Only search files visible under this selection
        #[arg(long, value_name = "CODE|all")]
        lang: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Language code, or "all"
    #[arg(long, value_name = "CODE|all")]
    pub lang: Option<String>,
    /// Device locale used when --lang is absent
    #[arg(long, value_name = "LOCALE")]
    pub device_lang: Option<String>,
    #[arg(long, value_name = "strict|fallback")]
    pub policy: Option<String>,
    #[arg(long, value_name = "hash|document-name")]
    pub group_by: Option<String>,
    /// Hide subfolders with nothing to show
    #[arg(long)]
    pub hide_empty: bool,
    #[arg(long)]
    pub json: bool,
}

/// Everything a command needs, loaded once.
struct Context {
    config: Config,
    catalog: Catalog,
    table: LanguageTable,
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        let config = Config::load(self.config.as_deref()).or_raise(|| ErrorKind::Config)?;
        let manifest_path = self.manifest.unwrap_or_else(|| config.sources.manifest.clone());
        let categories_path = self.categories.or_else(|| config.sources.categories.clone());
        let table = config.language_table().or_raise(|| ErrorKind::Config)?;
        let manifest = source::read_manifest(&manifest_path, &table)?;
        let categories = source::read_categories(categories_path.as_deref());
        let ctx = Context {
            catalog: Catalog::new(&manifest.records, &categories),
            table,
            config,
        };
        let mut out = io::stdout().lock();
        match self.command {
            Command::Tree(args) => tree(&ctx, &args, &mut out)?,
            Command::Languages { device_lang } => languages(&ctx, device_lang.as_deref(), &mut out)?,
            Command::Locate { hash, lang, json } => {
                if !locate(&ctx, &hash, lang.as_deref(), json, &mut out)? {
                    return Ok(ExitCode::from(NOT_FOUND));
                }
            },
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn tree(ctx: &Context, args: &TreeArgs, out: &mut impl Write) -> Result<()> {
    let mut filter = ctx.config.language_filter().or_raise(|| ErrorKind::Config)?;
    if let Some(policy) = &args.policy {
        filter.policy = policy.parse::<Policy>().or_raise(|| ErrorKind::Argument("--policy"))?;
    }
    if let Some(group_by) = &args.group_by {
        filter.group_by = group_by.parse::<GroupKey>().or_raise(|| ErrorKind::Argument("--group-by"))?;
    }
    let selection = select(ctx, args.lang.as_deref(), args.device_lang.as_deref())?;
    let mut view = ctx.catalog.view(&filter, &selection);
    if args.hide_empty || ctx.config.catalog.hide_empty {
        view = view.pruned();
    }
    if view.is_empty() {
        tracing::warn!(%selection, "Nothing to show for this selection");
    }
    if args.json {
        return json(&view, out);
    }
    write!(out, "{}", TreeText(&view)).or_raise(|| ErrorKind::Output)
}

fn languages(ctx: &Context, device: Option<&str>, out: &mut impl Write) -> Result<()> {
    let default = ctx.config.default_language().or_raise(|| ErrorKind::Config)?;
    let preferred = device.and_then(device_language);
    let options = ctx.catalog.language_options(preferred.as_ref(), &default, &ctx.table);
    write!(out, "{}", LanguagesText(&options)).or_raise(|| ErrorKind::Output)
}

/// Prints the reveal path for `hash`; `false` when there is nothing to print.
fn locate(ctx: &Context, hash: &str, lang: Option<&str>, as_json: bool, out: &mut impl Write) -> Result<bool> {
    let found = match lang {
        Some(lang) => {
            let filter = ctx.config.language_filter().or_raise(|| ErrorKind::Config)?;
            let selection = select(ctx, Some(lang), None)?;
            ctx.catalog.view(&filter, &selection).locate(hash)
        },
        None => ctx.catalog.locate(hash),
    };
    let Some(path) = found else {
        tracing::warn!(hash, "File not found");
        return Ok(false);
    };
    if as_json {
        json(&path, out)?;
    } else {
        writeln!(out, "{}", RevealText(&path)).or_raise(|| ErrorKind::Output)?;
    }
    Ok(true)
}

/// Resolves the selection the way a first visit would: an explicit choice if
/// the catalog offers it, then the device language, then the default.
fn select(ctx: &Context, lang: Option<&str>, device: Option<&str>) -> Result<Selection> {
    let requested = lang
        .map(|lang| lang.parse::<Selection>().or_raise(|| ErrorKind::Argument("--lang")))
        .transpose()?;
    let fallback: LanguageCode = ctx.config.default_language().or_raise(|| ErrorKind::Config)?;
    let preferred = device.and_then(device_language);
    let options = ctx.catalog.language_options(preferred.as_ref(), &fallback, &ctx.table);
    let selection = initial_selection(lang, device, &options, &fallback);
    if let Some(requested) = requested
        && requested != selection
    {
        tracing::warn!(%requested, %selection, "Language not in catalog, using another");
    }
    Ok(selection)
}

fn json(value: &impl Serialize, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).or_raise(|| ErrorKind::Output)?;
    writeln!(out).or_raise(|| ErrorKind::Output)
}
