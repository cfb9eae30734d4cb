use clap::Args;
use pagelinks_core::{AppConfig, ResolverConfig};
use pagelinks_pages::{RelatedPageSet, RelatedPagesResolver};

use super::connect;

#[derive(Debug, Args)]
pub struct RelatedArgs {
    /// Id of the page to find references to
    #[arg(long)]
    pub page_id: i64,

    /// Stream backing the page's page type
    #[arg(long)]
    pub stream_id: i64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Site table prefix (overrides PAGELINKS_TABLE_PREFIX)
    #[arg(long)]
    pub table_prefix: Option<String>,

    /// Namespace of relationship fields and page streams (overrides PAGELINKS_NAMESPACE)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Storage-table queries kept in flight at once (overrides PAGELINKS_FAN_OUT)
    #[arg(long)]
    pub fan_out: Option<usize>,
}

impl RelatedArgs {
    pub fn apply_overrides(&self, resolver: &mut ResolverConfig) {
        if let Some(prefix) = &self.table_prefix {
            resolver.table_prefix = prefix.clone();
        }
        if let Some(namespace) = &self.namespace {
            resolver.namespace = namespace.clone();
        }
        if let Some(fan_out) = self.fan_out {
            resolver.fan_out = fan_out;
        }
    }
}

pub async fn run(config: &AppConfig, args: &RelatedArgs) -> anyhow::Result<()> {
    let pool = connect(&config.database).await?;
    let resolver = RelatedPagesResolver::new(pool.clone(), config.resolver.clone())?;

    let result = resolver
        .get_related_pages(Some(args.page_id), Some(args.stream_id))
        .await;
    pool.close().await?;
    let sets = result?;

    tracing::info!(
        page_id = args.page_id,
        stream_id = args.stream_id,
        sets = sets.as_ref().map_or(0, Vec::len),
        "related pages resolved"
    );
    println!("{}", render(sets.as_deref(), args.pretty)?);
    Ok(())
}

/// JSON for the resolved sets; `null` when nothing is related
pub fn render(sets: Option<&[RelatedPageSet]>, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(&sets)
    } else {
        serde_json::to_string(&sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelinks_pages::{ActiveRelation, Page};

    fn args(extra: &[&str]) -> RelatedArgs {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RelatedArgs,
        }

        let mut argv = vec!["related", "--page-id", "42", "--stream-id", "5"];
        argv.extend_from_slice(extra);
        Wrapper::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_overrides_replace_only_given_settings() {
        let mut resolver = ResolverConfig::default();
        args(&["--fan-out", "4", "--table-prefix", "site_"]).apply_overrides(&mut resolver);

        assert_eq!(resolver.fan_out, 4);
        assert_eq!(resolver.table_prefix, "site_");
        assert_eq!(resolver.namespace, "pages");
    }

    #[test]
    fn test_render_none_as_null() {
        assert_eq!(render(None, false).unwrap(), "null");
        assert_eq!(render(None, true).unwrap(), "null");
    }

    #[test]
    fn test_render_sets() {
        let set = RelatedPageSet {
            relation: ActiveRelation {
                type_id: 9,
                type_slug: "article".to_string(),
                type_title: "Article".to_string(),
                stream_id: 5,
                stream_slug: "articles".to_string(),
                stream_prefix: "data_".to_string(),
                field_id: 1,
            },
            field_name: "Related".to_string(),
            field_slug: "related".to_string(),
            related_pages: vec![Page {
                id: 100,
                entry_id: 100,
                type_id: 9,
                attributes: serde_json::Map::new(),
            }],
        };

        let sets = vec![set];
        let rendered = render(Some(sets.as_slice()), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["type_id"], 9);
        assert_eq!(value[0]["field_slug"], "related");
        assert_eq!(value[0]["related_pages"][0]["id"], 100);
    }
}
