//! The `faintly` command line: render one block or template to stdout.

use crate::error::Error;
use clap::{ArgGroup, Parser};
use faintly_dom::{Node, parse_fragment};
use faintly_expr::Context;
use faintly_expr::context::BLOCK_NAME;
use faintly_renderer::{RenderConfig, Renderer};
use faintly_resource::{FilesystemTemplateSource, HttpTemplateSource};
use faintly_traits::TemplateSource;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
#[command(name = "faintly", version, about = "Render data-fly-* HTML templates")]
#[command(group(ArgGroup::new("source").required(true).args(["root", "base_url"])))]
pub struct Cli {
    /// Directory template paths are resolved under
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Base URL template paths are fetched from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Block name; selects /blocks/<name>/<name>.html by default
    #[arg(long)]
    pub block: Option<String>,

    /// JSON object used as the rendering context
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// HTML file holding the block element to render into
    #[arg(long)]
    pub block_html: Option<PathBuf>,

    /// Template file path, overriding the block default
    #[arg(long)]
    pub template: Option<String>,

    /// Named fragment (data-fly-name) inside the template file
    #[arg(long)]
    pub fragment: Option<String>,

    /// JSON file with renderer settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub code_base_path: Option<String>,

    #[arg(long)]
    pub max_include_depth: Option<usize>,

    /// Skip wrapping loose block cell content in <p>
    #[arg(long)]
    pub no_wrap: bool,
}

impl Cli {
    /// Settings from `--config`, with the individual flags applied on top.
    pub fn render_config(&self) -> Result<RenderConfig, Error> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => RenderConfig::default(),
        };
        if let Some(path) = &self.code_base_path {
            config.code_base_path = path.clone();
        }
        if let Some(depth) = self.max_include_depth {
            config.max_include_depth = depth;
        }
        if self.no_wrap {
            config.wrap_text_nodes = false;
        }
        Ok(config)
    }

    fn template_source(&self) -> Result<Arc<dyn TemplateSource>, Error> {
        match (&self.root, &self.base_url) {
            (Some(root), _) => Ok(Arc::new(FilesystemTemplateSource::new(root))),
            (None, Some(url)) => Ok(Arc::new(HttpTemplateSource::new(url.as_str()))),
            (None, None) => Err(Error::Usage(
                "either --root or --base-url is required".to_string(),
            )),
        }
    }

    /// The context file's object plus the template and block selections.
    pub fn load_context(&self) -> Result<Context, Error> {
        let mut context = match &self.context {
            Some(path) => {
                let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
                match json {
                    serde_json::Value::Object(map) => Context::from(map),
                    other => {
                        return Err(Error::Usage(format!(
                            "{} must hold a JSON object, found {}",
                            path.display(),
                            json_kind(&other)
                        )));
                    }
                }
            }
            None => Context::new(),
        };
        if let Some(block) = &self.block {
            context.insert(BLOCK_NAME, block.as_str());
        }
        if self.template.is_some() || self.fragment.is_some() {
            let path = self.template.clone().unwrap_or_default();
            let name = self.fragment.clone().unwrap_or_default();
            context.set_template(path, name);
        }
        Ok(context)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Renders what `cli` describes and returns the HTML.
///
/// With `--block-html` the first element of that file is rendered as a
/// block and returned whole; otherwise only the rendered fragment is.
pub async fn run(cli: &Cli) -> Result<String, Error> {
    let renderer = Renderer::builder()
        .with_source(cli.template_source()?)
        .with_config(cli.render_config()?)
        .build()?;
    let context = cli.load_context()?;

    let Some(path) = &cli.block_html else {
        if cli.block.is_none() && cli.template.is_none() {
            return Err(Error::Usage(
                "nothing to render: pass --block, --template or --block-html".to_string(),
            ));
        }
        info!(
            "Rendering {}",
            cli.template.as_deref().or(cli.block.as_deref()).unwrap_or_default()
        );
        return Ok(renderer.render(context).await?.to_html());
    };

    let markup = fs::read_to_string(path)?;
    let mut block = parse_fragment(&markup)?
        .into_children()
        .into_iter()
        .find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
        .ok_or_else(|| Error::Usage(format!("{} contains no element", path.display())))?;
    if let Some(name) = &cli.block {
        block.set_attribute("data-block-name", name.as_str());
    }
    info!("Rendering block from {}", path.display());
    renderer.render_block(&mut block, context).await?;
    Ok(block.to_html())
}
