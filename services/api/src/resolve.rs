use crate::infra::{build_service, load_catalog, parse_locale};
use clap::Args;
use guidebook::catalog::{InMemoryCatalog, PathLookup, ResolutionService, ResolvedPathView};
use guidebook::config::{CatalogConfig, TelemetryConfig};
use guidebook::content::Locale;
use guidebook::error::AppError;
use guidebook::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Catalog JSON to resolve against (defaults to APP_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Display locale for names and step text (es, en, fr; region tags accepted)
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<Locale>,
    /// Property ID or slug
    pub(crate) property: String,
    /// Optional zone ID or slug within the property
    pub(crate) zone: Option<String>,
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    telemetry::init_stderr(&TelemetryConfig::load()?)?;

    let config = catalog_config(&args)?;
    let catalog = load_catalog(&config)?;
    let service = build_service(catalog, &config);

    println!("{}", describe(&service, &args)?);
    Ok(())
}

/// Server settings are never read here, so a bad `APP_PORT` cannot break the command.
fn catalog_config(args: &ResolveArgs) -> Result<CatalogConfig, AppError> {
    let mut config = CatalogConfig::load()?;
    if let Some(path) = &args.catalog {
        config.seed_path = Some(path.clone());
    }
    Ok(config)
}

fn describe(
    service: &ResolutionService<InMemoryCatalog>,
    args: &ResolveArgs,
) -> Result<String, AppError> {
    let lookup = service.resolve_path(&args.property, args.zone.as_deref())?;
    let resolved = match lookup {
        PathLookup::Resolved(resolved) => resolved,
        PathLookup::MissingProperty => {
            return Ok(format!("Property not found: {}", args.property));
        }
        PathLookup::MissingZone { property } => {
            return Ok(format!(
                "Zone not found: {} (property {})",
                args.zone.as_deref().unwrap_or_default(),
                property.id
            ));
        }
    };

    let locales = service.preference_for(args.locale);
    let view = resolved.view(&locales);
    let mut lines = vec![format!("Locale: {}", view.locale)];
    render_view(&view, &mut lines);
    if resolved.redirect_target(service.slug_policy()) != resolved.canonical_path() {
        lines.push(format!(
            "Slug routes redirect to: {}",
            resolved.redirect_target(service.slug_policy())
        ));
    }
    Ok(lines.join("\n"))
}

fn render_view(view: &ResolvedPathView, lines: &mut Vec<String>) {
    let property = &view.property;
    lines.push(format!("Property: {} ({})", property.name, property.id));
    lines.push(format!("Canonical path: {}", property.canonical_path));

    let Some(zone) = &view.zone else {
        return;
    };

    lines.push(format!("\nZone: {} ({})", zone.name, zone.id));
    lines.push(format!("Canonical path: {}", zone.canonical_path));
    if !zone.description.is_empty() {
        lines.push(format!("Description: {}", zone.description));
    }

    if zone.steps.is_empty() {
        lines.push("Steps: none".to_string());
    } else {
        lines.push("Steps".to_string());
        for step in &zone.steps {
            lines.push(format!(
                "- [{}] {} {}: {}",
                step.order, step.step_type, step.title, step.content
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_catalog_from;
    use guidebook::content::LocalePreference;
    use std::path::Path;

    const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/catalog.json");

    fn service() -> ResolutionService<InMemoryCatalog> {
        let catalog = load_catalog_from(Path::new(CATALOG)).expect("sample catalog loads");
        let config = CatalogConfig {
            seed_path: None,
            locales: LocalePreference::default(),
            slug_policy: Default::default(),
        };
        build_service(catalog, &config)
    }

    fn args(property: &str, zone: Option<&str>, locale: Option<Locale>) -> ResolveArgs {
        ResolveArgs {
            catalog: None,
            locale,
            property: property.to_string(),
            zone: zone.map(str::to_string),
        }
    }

    #[test]
    fn describes_zone_with_ordered_steps() {
        let output = describe(&service(), &args("casa-playa", Some("wifi"), Some(Locale::En)))
            .expect("describes");

        assert!(output.contains("Locale: en"));
        assert!(output.contains("Property: Beach House (clx8k2m9p0000qw3h5f7a1b2c)"));
        assert!(output.contains("Canonical path: /properties/casa-playa/wifi"));
        let network = output.find("Network").expect("first step");
        let password = output.find("Password").expect("second step");
        assert!(network < password);
    }

    #[test]
    fn reports_missing_entities() {
        let output = describe(&service(), &args("no-existe", None, None)).expect("describes");
        assert_eq!(output, "Property not found: no-existe");

        let output =
            describe(&service(), &args("casa-playa", Some("sauna"), None)).expect("describes");
        assert!(output.starts_with("Zone not found: sauna"));
    }

    #[test]
    fn catalog_flag_overrides_configured_path() {
        let mut resolve = args("casa-playa", None, None);
        resolve.catalog = Some(PathBuf::from(CATALOG));

        let config = catalog_config(&resolve).expect("catalog config loads");
        assert_eq!(config.seed_path, Some(PathBuf::from(CATALOG)));

        let catalog = load_catalog(&config).expect("sample catalog loads");
        assert!(catalog.property_count() > 0);
    }
}
