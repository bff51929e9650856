use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use localized_routes::{
    InitialLanguage, LocalizedRoutesService, LocalizedRoutesSettings, RouteParser,
    load_dictionary_from_dir, load_routes_from_file, load_settings_from_file, match_url,
};
use tracing_subscriber::EnvFilter;

fn settings_arg() -> Arg {
    Arg::new("settings")
        .long("settings")
        .short('s')
        .help("Settings JSON file (defaultLang, langs, translations)")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
}

fn dictionaries_arg() -> Arg {
    Arg::new("dictionaries")
        .long("dictionaries")
        .short('d')
        .help("Directory of <lang>.json segment translations, merged over the settings")
        .value_parser(clap::value_parser!(PathBuf))
}

fn routes_arg() -> Arg {
    Arg::new("routes")
        .long("routes")
        .short('r')
        .help("Canonical route table as a JSON array")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
}

fn lang_arg() -> Arg {
    Arg::new("lang")
        .long("lang")
        .short('l')
        .help("Target language code (e.g., da, de)")
        .required(true)
}

fn cli() -> Command {
    Command::new("localized-routes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate route tables and URLs between languages")
        .subcommand_required(true)
        .subcommand(
            Command::new("tree")
                .about("Print the route table translated into a language")
                .arg(settings_arg())
                .arg(dictionaries_arg())
                .arg(routes_arg())
                .arg(lang_arg()),
        )
        .subcommand(
            Command::new("url")
                .about("Translate a URL on a localized site into another language")
                .arg(settings_arg())
                .arg(dictionaries_arg())
                .arg(routes_arg())
                .arg(lang_arg())
                .arg(
                    Arg::new("url")
                        .long("url")
                        .short('u')
                        .help("Current URL path, e.g. /da/bruger/42")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("link")
                .about("Translate a link path into a language")
                .arg(settings_arg())
                .arg(dictionaries_arg())
                .arg(lang_arg())
                .arg(
                    Arg::new("path")
                        .long("path")
                        .short('p')
                        .help("Canonical link path, e.g. /user/profile")
                        .required(true),
                )
                .arg(
                    Arg::new("localize")
                        .long("localize")
                        .help("Add the language prefix to the link")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn load_settings(matches: &ArgMatches) -> Result<LocalizedRoutesSettings> {
    let path = required_path(matches, "settings")?;
    let mut settings = load_settings_from_file(path)
        .with_context(|| format!("loading settings from {}", path.display()))?;

    if let Some(dir) = matches.get_one::<PathBuf>("dictionaries") {
        let dictionary = load_dictionary_from_dir(dir)
            .with_context(|| format!("loading dictionaries from {}", dir.display()))?;
        settings.translations.merge(dictionary);
        settings.validate()?;
    }
    Ok(settings)
}

fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    matches
        .get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{id}"))
}

fn required_str<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}

fn check_lang(settings: &LocalizedRoutesSettings, lang: &str) -> Result<()> {
    if !settings.is_supported(lang) {
        bail!(
            "language '{lang}' is not configured (available: {})",
            settings.langs.join(", ")
        );
    }
    Ok(())
}

fn run_tree(matches: &ArgMatches) -> Result<()> {
    let settings = load_settings(matches)?;
    let lang = required_str(matches, "lang")?;
    check_lang(&settings, lang)?;
    let routes = load_routes_from_file(required_path(matches, "routes")?)?;

    let translated = RouteParser::new(settings).translate_routes(&routes, lang);
    println!("{}", serde_json::to_string_pretty(&translated)?);
    Ok(())
}

fn run_url(matches: &ArgMatches) -> Result<()> {
    let settings = load_settings(matches)?;
    let lang = required_str(matches, "lang")?;
    check_lang(&settings, lang)?;
    let url = required_str(matches, "url")?;
    let routes = load_routes_from_file(required_path(matches, "routes")?)?;

    // build the live table the URL was served from
    let mut service = LocalizedRoutesService::new(settings, routes);
    match service.init(url) {
        InitialLanguage::FromUrl(from) => {
            tracing::debug!(url, lang = %from, "Matching URL against the language routes");
        }
        _ => tracing::debug!(url, "No language prefix, matching against the default routes"),
    }

    let snapshot = match match_url(service.routes(), url) {
        Some(snapshot) => snapshot,
        None => {
            tracing::warn!(url, "URL does not match any route, only the prefix is translated");
            Default::default()
        }
    };
    let translated = service
        .parser()
        .translate_path_from_string(url, lang, &snapshot);
    println!("{translated}");
    Ok(())
}

fn run_link(matches: &ArgMatches) -> Result<()> {
    let settings = load_settings(matches)?;
    let lang = required_str(matches, "lang")?;
    check_lang(&settings, lang)?;
    let path = required_str(matches, "path")?;
    let localize = matches.get_flag("localize");

    let translated = RouteParser::new(settings).translate_path_str(path, lang, localize);
    println!("{translated}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("localized_routes=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("tree", sub)) => run_tree(sub),
        Some(("url", sub)) => run_url(sub),
        Some(("link", sub)) => run_link(sub),
        _ => unreachable!("subcommand_required is set"),
    }
}
