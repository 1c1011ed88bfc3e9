use super::{ensure_declared, target_element};
use crate::cli::OutputFormat;
use crate::collector::AnnotationMetaDataCollector;
use crate::config::{
    load_config_from, load_config_from_path, InheritanceConfiguration, MetaInheritConfig,
    ResolutionSettings,
};
use crate::hierarchy::{ElementKind, TargetElement, TypeModel, TypeName};
use crate::metadata::Annotation;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for `metainherit resolve`
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    pub model: PathBuf,
    pub type_name: String,
    pub method: Option<String>,
    pub params: Vec<String>,
    pub declaring: Option<String>,
    pub config: Option<PathBuf>,
    pub only: Option<Vec<String>>,
    pub include_class: Option<bool>,
    pub include_superclasses: Option<bool>,
    pub include_interfaces: Option<bool>,
    pub format: OutputFormat,
}

/// Result of a single resolution, as printed by `--format json`
#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub target: TargetElement,
    pub declaring_type: TypeName,
    pub inheritance: InheritanceConfiguration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercepting_metadata: Option<Vec<String>>,
    pub metadata: Vec<Annotation>,
}

pub fn handle_resolve_command(config: ResolveConfig) -> Result<()> {
    let model = Arc::new(TypeModel::load(&config.model)?);
    let file_config = match &config.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config_from(std::env::current_dir().context("Failed to read working directory")?),
    };
    let settings = resolution_settings(&file_config, &config);

    let ty = TypeName::from(config.type_name.as_str());
    ensure_declared(&model, &ty)?;
    let declaring_type = config
        .declaring
        .as_deref()
        .map(TypeName::from)
        .unwrap_or_else(|| ty.clone());
    ensure_declared(&model, &declaring_type)?;

    let element = target_element(&ty, config.method.as_deref(), &config.params);
    let kind = match element {
        TargetElement::Method(_) => ElementKind::Method,
        TargetElement::Type(_) => ElementKind::Type,
    };

    let collector = AnnotationMetaDataCollector::from_model(model).with_settings(settings.clone());
    let metadata = collector.get_metadata(&element, kind, &declaring_type)?;

    let report = ResolveReport {
        target: element,
        declaring_type,
        inheritance: settings.inheritance,
        intercepting_metadata: settings.intercepting_metadata,
        metadata: metadata.to_vec(),
    };

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Layer command-line overrides on top of the file configuration
pub fn resolution_settings(file: &MetaInheritConfig, config: &ResolveConfig) -> ResolutionSettings {
    let mut settings = file.resolution_settings();
    if let Some(include) = config.include_class {
        settings.inheritance.set_include_class(include);
    }
    if let Some(include) = config.include_superclasses {
        settings.inheritance.set_include_superclasses(include);
    }
    if let Some(include) = config.include_interfaces {
        settings.inheritance.set_include_interfaces(include);
    }
    if let Some(only) = &config.only {
        settings.intercepting_metadata = Some(only.clone());
    }
    settings
}

pub fn render_text(report: &ResolveReport) -> String {
    let mut out = format!(
        "{} {} {}\n",
        report.target.to_string().bold(),
        "on".dimmed(),
        report.declaring_type.to_string().bold()
    );
    out.push_str(&format!("  {}\n", report.inheritance.to_string().dimmed()));
    if let Some(kinds) = &report.intercepting_metadata {
        out.push_str(&format!("  {} {}\n", "only:".dimmed(), kinds.join(", ")));
    }
    if report.metadata.is_empty() {
        out.push_str(&format!("  {}\n", "(no metadata)".yellow()));
    }
    for annotation in &report.metadata {
        out.push_str(&format!("  {}\n", annotation.to_string().green()));
    }
    out
}
