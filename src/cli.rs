// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::Settings;
use crate::data::{Dataset, Lookup};
use crate::error::Error;
use crate::service::DataService;
use crate::specs::people::PersonRecord;

/// Load the family sheet (cached) and print a summary, a person, or the whole dataset.
#[derive(Parser, Debug, Default)]
#[command(name = "family_sheet", version)]
pub struct Args {
    /// Ignore a fresh cache entry and fetch the sheet again
    #[arg(long)]
    pub refresh: bool,

    /// Remove the cached entry and exit
    #[arg(long)]
    pub clear_cache: bool,

    /// Show one person and their immediate family
    #[arg(long, value_name = "ID")]
    pub person: Option<String>,

    /// Print the dataset as JSON
    #[arg(long)]
    pub json: bool,

    /// Sheet CSV URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Write logs to <store>/debug.log instead of stderr
    #[arg(long)]
    pub debug_log: bool,
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let settings = load_settings(&args)?;

    let log_path: Option<PathBuf> = settings
        .log_file
        .clone()
        .or_else(|| args.debug_log.then(|| settings.default_log_path()));
    match &log_path {
        Some(p) => crate::log::init_file(p).wrap_err_with(|| format!("opening log {}", p.display()))?,
        None => crate::log::init(),
    }

    let service = DataService::from_settings(&settings)?;
    let stdout = io::stdout();
    execute(&args, &service, &mut stdout.lock())
}

/// Config file/env settings with command-line overrides applied.
pub fn load_settings(args: &Args) -> Result<Settings, Error> {
    let mut settings = Settings::load()?;
    if let Some(url) = &args.url {
        settings.sheet_url = url.clone();
    }
    Ok(settings)
}

/// Act on parsed args against an already-built service.
pub fn execute<F, S, W>(args: &Args, service: &DataService<F, S>, out: &mut W) -> Result<()>
where
    F: crate::core::net::Fetch,
    S: crate::store::Slots,
    W: Write,
{
    if args.clear_cache {
        service.clear_cache();
        writeln!(out, "Cache cleared")?;
        return Ok(());
    }

    let ds = service.get_data(args.refresh);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &ds)?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(id) = &args.person {
        let lookup = ds.lookup();
        let person = lookup.get(id).ok_or_else(|| eyre!("No person with id {id}"))?;
        write!(out, "{}", render_person(&lookup, person))?;
        return Ok(());
    }

    write!(out, "{}", summary(&ds))?;
    Ok(())
}

pub fn summary(ds: &Dataset) -> String {
    let mut s = s!();
    match &ds.metadata {
        Some(m) => {
            s.push_str(&format!("Records: {}\n", m.record_count));
            s.push_str(&format!("Source: {}\n", m.source));
            s.push_str(&format!("Last updated: {}\n", m.last_updated.to_rfc3339()));
            if let Some(e) = &m.error {
                s.push_str(&format!("Error: {}\n", e));
            }
        }
        None => s.push_str("Records: 0\n"),
    }
    s
}

pub fn render_person(lookup: &Lookup<'_>, p: &PersonRecord) -> String {
    let mut s = format!("{} [{}]\n", if p.name.is_empty() { "(unnamed)" } else { p.name.as_str() }, p.id);

    let years = match (p.birth_year, p.death_year) {
        (None, None) => None,
        (b, d) => Some(format!(
            "{}–{}",
            b.map(|y| y.to_string()).unwrap_or_default(),
            d.map(|y| y.to_string()).unwrap_or_default()
        )),
    };
    if let Some(y) = years {
        s.push_str(&format!("  Years: {}\n", y));
    }
    if !p.birth_place.is_empty() {
        s.push_str(&format!("  Born: {}\n", p.birth_place));
    }
    if !p.occupation.is_empty() {
        s.push_str(&format!("  Occupation: {}\n", p.occupation));
    }

    let line = |label: &str, people: Vec<&PersonRecord>| -> String {
        if people.is_empty() { return s!(); }
        let names = people.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ");
        format!("  {}: {}\n", label, names)
    };
    s.push_str(&line("Parents", lookup.parents_of(p)));
    s.push_str(&line("Spouses", lookup.spouses_of(p)));
    s.push_str(&line("Siblings", lookup.siblings_of(p)));
    s.push_str(&line("Children", lookup.children_of(p)));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_document;

    const SHEET: &str = "\
Person ID,First Name,Last Name,Birth Year,Death Year,Father ID,Children IDs,Occupation
P1,John,Smith,1900,1970,,P2,Farmer
P2,Jane,Smith,1930,,P1,,
";

    #[test]
    fn args_parse_flags() {
        let a = Args::parse_from(["family_sheet", "--refresh", "--person", "P1"]);
        assert!(a.refresh);
        assert_eq!(a.person.as_deref(), Some("P1"));
        assert!(!a.json);
    }

    #[test]
    fn url_flag_overrides_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("family_sheet.toml", r#"sheet_url = "https://from.file/sheet.csv""#)?;
            let a = Args::parse_from(["family_sheet"]);
            assert_eq!(load_settings(&a).unwrap().sheet_url, "https://from.file/sheet.csv");

            let a = Args::parse_from(["family_sheet", "--url", "https://from.flag/sheet.csv"]);
            assert_eq!(load_settings(&a).unwrap().sheet_url, "https://from.flag/sheet.csv");
            Ok(())
        });
    }

    #[test]
    fn bad_config_is_a_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("family_sheet.toml", r#"cache_duration_ms = "soon""#)?;
            let a = Args::parse_from(["family_sheet"]);
            assert!(matches!(load_settings(&a), Err(Error::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn render_person_lists_family() {
        let ds = parse_document(SHEET);
        let lookup = ds.lookup();
        let p1 = render_person(&lookup, lookup.get("P1").unwrap());
        assert!(p1.starts_with("John Smith [P1]\n"));
        assert!(p1.contains("Years: 1900–1970"));
        assert!(p1.contains("Occupation: Farmer"));
        assert!(p1.contains("Children: Jane Smith"));

        let p2 = render_person(&lookup, lookup.get("P2").unwrap());
        assert!(p2.contains("Years: 1930–\n"));
        assert!(p2.contains("Parents: John Smith"));
        assert!(!p2.contains("Children"));
    }

    #[test]
    fn summary_reports_error() {
        let ds = Dataset::failed(chrono::Utc::now(), "Failed to load data: offline");
        let s = summary(&ds);
        assert!(s.contains("Records: 0"));
        assert!(s.contains("Error: Failed to load data: offline"));
    }
}
