use std::path::Path;

use clubguard_core::{get_default_route, AccessDecision, RoutePattern};
use serde::Serialize;

use crate::commands::common::{
    format_pattern_list, load_route_config, parse_role_strict, parse_subject,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct AccessReport {
    pub path: String,
    pub role: Option<String>,
    pub status: Option<String>,
    pub public: bool,
    pub allowed: bool,
    pub redirect: Option<&'static str>,
}

pub fn run_access(
    path: &str,
    role: Option<&str>,
    status: Option<&str>,
    as_json: bool,
    routes: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_route_config(routes)?;
    let subject = parse_subject(role, status);
    let decision = config.guard(path, &subject);

    let report = AccessReport {
        path: path.to_string(),
        role: subject.role.map(|role| role.to_string()),
        status: subject.status.as_ref().map(ToString::to_string),
        public: config.is_public_route(path),
        allowed: decision.is_allowed(),
        redirect: match decision {
            AccessDecision::Allow => None,
            AccessDecision::Redirect(target) => Some(target),
        },
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_access_report(&report));
    }
    Ok(())
}

pub fn format_access_report(report: &AccessReport) -> String {
    match report.redirect {
        None if report.public => format!("allow {} (public)", report.path),
        None => format!("allow {}", report.path),
        Some(target) => format!("deny {} -> redirect {target}", report.path),
    }
}

pub fn run_default_route(role: Option<&str>, status: Option<&str>) {
    let subject = parse_subject(role, status);
    println!(
        "{}",
        get_default_route(subject.role, subject.status.as_ref())
    );
}

pub fn run_routes(role: Option<&str>, as_json: bool, routes: Option<&Path>) -> Result<(), CliError> {
    let config = load_route_config(routes)?;

    if let Some(raw) = role {
        let role = parse_role_strict(raw)?;
        let patterns: &[RoutePattern] = config.routes_for(role).unwrap_or_default();
        if as_json {
            println!("{}", serde_json::to_string_pretty(patterns)?);
        } else if patterns.is_empty() {
            println!("{role}: (no routes)");
        } else {
            println!("{role}: {}", format_pattern_list(patterns));
        }
        return Ok(());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("public: {}", format_pattern_list(&config.public_routes));
    println!("pending: {}", format_pattern_list(&config.pending_user_routes));
    for (role, patterns) in &config.role_routes {
        println!("{role}: {}", format_pattern_list(patterns));
    }
    Ok(())
}
