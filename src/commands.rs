//! CLI command dispatch. Results go to stdout, logs to stderr.

use anyhow::{bail, Context};
use serde::Serialize;

use pagescript_core::Service;
use pagescript_protocols::{AiStatus, AiStatusReport, ExecutionResult, PageSummary, Settings, TabId};

use crate::cli::{Commands, SettingsAction};

pub(crate) async fn run(service: &Service, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve => crate::server::serve_stdio(service).await,
        Commands::Status => status(service).await,
        Commands::Generate { prompt } => {
            let code = service.generate_script(&prompt).await?;
            println!("{}", code);
            Ok(())
        }
        Commands::Execute { tab, code, file } => {
            let code = match (code, file) {
                (Some(code), _) => code,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("either code or --file is required"),
            };
            report_execution(service.execute_script(tab, &code).await)
        }
        Commands::Run { prompt, tab } => {
            let tab_id = resolve_tab(service, tab).await?;
            let code = service.generate_script(&prompt).await?;
            eprintln!("{}", code);
            report_execution(service.execute_script(tab_id, &code).await)
        }
        Commands::CurrentTab => {
            let tab = service.current_tab().await?;
            print_json(&tab)
        }
        Commands::Summarize { tab } => {
            let tab_id = resolve_tab(service, tab).await?;
            let summary = service.summarize_page(tab_id).await?;
            print_summary(&summary);
            Ok(())
        }
        Commands::Settings { action } => settings(service, action).await,
    }
}

async fn status(service: &Service) -> anyhow::Result<()> {
    let report = service.check_status().await?;
    println!("{}", status_line(&report));
    if report.status != AiStatus::Ready {
        let provider = report.provider.map(|p| p.to_string()).unwrap_or_default();
        bail!("{} is not ready", provider);
    }
    Ok(())
}

fn status_line(report: &AiStatusReport) -> String {
    let provider = report.provider.map(|p| p.to_string()).unwrap_or_default();
    match &report.message {
        Some(message) => format!("{}: {} ({})", provider, report.status.as_str(), message),
        None => format!("{}: {}", provider, report.status.as_str()),
    }
}

async fn resolve_tab(service: &Service, tab: Option<TabId>) -> anyhow::Result<TabId> {
    match tab {
        Some(tab_id) => Ok(tab_id),
        None => Ok(service.current_tab().await?.tab_id),
    }
}

fn report_execution(result: ExecutionResult) -> anyhow::Result<()> {
    print_json(&result)?;
    if !result.success {
        bail!("script failed");
    }
    Ok(())
}

fn print_summary(summary: &PageSummary) {
    println!("{}", summary.overview);
    if !summary.points.is_empty() {
        println!();
        for point in &summary.points {
            println!("- {}", point);
        }
    }
    if !summary.keywords.is_empty() {
        println!();
        println!("Keywords: {}", summary.keywords.join(", "));
    }
}

async fn settings(service: &Service, action: SettingsAction) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = service.settings().await?;
            print_json(&masked(&settings))
        }
        SettingsAction::Set {
            provider,
            gemini_key,
            openai_key,
        } => {
            let mut settings = service.settings().await?;
            if let Some(provider) = provider {
                settings.provider = provider;
            }
            if let Some(key) = gemini_key {
                settings.gemini_api_key = key;
            }
            if let Some(key) = openai_key {
                settings.openai_api_key = key;
            }
            service.save_settings(&settings).await?;
            print_json(&masked(&settings))
        }
    }
}

/// Settings with keys shortened to their last four characters.
fn masked(settings: &Settings) -> Settings {
    Settings {
        provider: settings.provider,
        gemini_api_key: mask_key(&settings.gemini_api_key),
        openai_api_key: mask_key(&settings.openai_api_key),
    }
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 8 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagescript_protocols::ProviderKind;

    #[test]
    fn test_status_line_uses_wire_names() {
        let report = AiStatusReport::new(AiStatus::NoApiKey, ProviderKind::Gemini)
            .with_message("Set a Gemini API key");
        assert_eq!(status_line(&report), "Gemini: no-api-key (Set a Gemini API key)");

        let report = AiStatusReport::new(AiStatus::Ready, ProviderKind::OnDevice);
        assert_eq!(status_line(&report), "On-device model: ready");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("sk-1234567890abcd"), "*************abcd");
    }

    #[test]
    fn test_masked_settings_keep_provider() {
        let settings = Settings {
            provider: ProviderKind::OpenAi,
            gemini_api_key: String::new(),
            openai_api_key: "sk-proj-abcdefgh1234".to_string(),
        };
        let masked = masked(&settings);
        assert_eq!(masked.provider, ProviderKind::OpenAi);
        assert!(masked.gemini_api_key.is_empty());
        assert!(masked.openai_api_key.ends_with("1234"));
        assert!(!masked.openai_api_key.contains("proj"));
    }
}
