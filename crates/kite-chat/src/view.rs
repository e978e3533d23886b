//! Display model for one structured agent result.
//!
//! Sections appear in a fixed order and only when their backing field is
//! present and non-empty. Renderers walk a [`ResultView`] instead of the raw
//! [`AgentResult`], so they never need to reason about missing fields.

use kite_agent::{AgentResult, ResponseMetadata, ResultItem};

use crate::format::{Accent, action_accent, format_date, item_type_accent};
use crate::markup::{self, Block};

/// Title shown for items without one
pub const UNTITLED: &str = "Untitled";

/// Footer label when the reply does not name its agent
pub const DEFAULT_AGENT_LABEL: &str = "Agent";

/// Colored label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub accent: Accent,
}

/// Summary line with its optional action badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub text: String,
    pub action: Option<Badge>,
}

/// The single page a result refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// One listed workspace entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Position in the result's item list
    pub index: usize,
    pub badge: Option<Badge>,
    pub title: String,
    /// Formatted last-edited date
    pub edited: Option<String>,
    pub url: Option<String>,
    /// What the copy affordance puts on the clipboard
    pub copy_text: String,
}

/// Provenance line under a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub agent_name: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub summary: Option<SummaryView>,
    pub details: Vec<Block>,
    pub page: Option<PageRef>,
    pub items: Vec<ItemView>,
    pub footer: Option<Footer>,
}

impl ResultView {
    /// Build the view, formatting dates in local time
    pub fn new(result: &AgentResult, metadata: Option<&ResponseMetadata>) -> Self {
        Self::with_date_format(result, metadata, format_date)
    }

    /// Build the view with a custom date formatter
    pub fn with_date_format<F>(
        result: &AgentResult,
        metadata: Option<&ResponseMetadata>,
        format: F,
    ) -> Self
    where
        F: Fn(Option<&str>) -> String,
    {
        let data = result.data.as_ref();

        let summary = non_empty(result.summary.as_ref()).map(|text| SummaryView {
            text: text.to_string(),
            action: non_empty(data.and_then(|d| d.action_type.as_ref())).map(|action| Badge {
                label: action.to_string(),
                accent: action_accent(Some(action)),
            }),
        });

        let details = non_empty(data.and_then(|d| d.details.as_ref()))
            .map(markup::render)
            .unwrap_or_default();

        let page_title = non_empty(data.and_then(|d| d.page_title.as_ref()));
        let page_url = non_empty(data.and_then(|d| d.page_url.as_ref()));
        let page = (page_title.is_some() || page_url.is_some()).then(|| PageRef {
            title: page_title.map(str::to_string),
            url: page_url.map(str::to_string),
        });

        let items = result
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| item_view(index, item, &format))
            .collect();

        let footer = metadata.and_then(|m| {
            let timestamp = non_empty(m.timestamp.as_ref())?;
            Some(Footer {
                agent_name: non_empty(m.agent_name.as_ref())
                    .unwrap_or(DEFAULT_AGENT_LABEL)
                    .to_string(),
                timestamp: format(Some(timestamp)),
            })
        });

        Self {
            summary,
            details,
            page,
            items,
            footer,
        }
    }

    /// True when no section has anything to show
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.details.is_empty()
            && self.page.is_none()
            && self.items.is_empty()
            && self.footer.is_none()
    }
}

fn item_view<F>(index: usize, item: &ResultItem, format: &F) -> ItemView
where
    F: Fn(Option<&str>) -> String,
{
    let title = non_empty(item.title.as_ref());
    let url = non_empty(item.url.as_ref());
    ItemView {
        index,
        badge: non_empty(item.kind.as_ref()).map(|kind| Badge {
            label: kind.to_string(),
            accent: item_type_accent(Some(kind)),
        }),
        // A blank title is absent like every other field here
        title: title.unwrap_or(UNTITLED).to_string(),
        edited: non_empty(item.last_edited.as_ref()).map(|d| format(Some(d))),
        url: url.map(str::to_string),
        copy_text: url.or(title).unwrap_or_default().to_string(),
    }
}

/// Empty strings count as absent
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_date_in;
    use chrono::Utc;
    use kite_agent::ResultData;
    use serde_json::json;

    fn utc_view(result: &AgentResult, metadata: Option<&ResponseMetadata>) -> ResultView {
        ResultView::with_date_format(result, metadata, |d| format_date_in(d, &Utc))
    }

    fn full_result() -> AgentResult {
        AgentResult::from_value(json!({
            "summary": "Created the page.",
            "data": {
                "action_type": "Create",
                "page_title": "Meeting Notes",
                "page_url": "https://notion.so/meeting-notes",
                "details": "## Done\n- added **agenda**"
            },
            "items": [
                { "title": "Meeting Notes", "url": "https://notion.so/meeting-notes", "type": "page", "last_edited": "2024-06-11T12:00:00Z" },
                { "type": "database" }
            ]
        }))
    }

    #[test]
    fn test_full_result() {
        let metadata = ResponseMetadata {
            agent_name: Some("Notion Power Agent".into()),
            timestamp: Some("2024-06-11T12:00:00Z".into()),
        };
        let view = utc_view(&full_result(), Some(&metadata));

        let summary = view.summary.unwrap();
        assert_eq!(summary.text, "Created the page.");
        assert_eq!(
            summary.action,
            Some(Badge {
                label: "Create".into(),
                accent: Accent::Emerald
            })
        );

        assert_eq!(view.details.len(), 2);

        let page = view.page.unwrap();
        assert_eq!(page.title.as_deref(), Some("Meeting Notes"));
        assert_eq!(page.url.as_deref(), Some("https://notion.so/meeting-notes"));

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].edited.as_deref(), Some("Jun 11, 2024, 12:00 PM"));
        assert_eq!(view.items[0].copy_text, "https://notion.so/meeting-notes");
        assert_eq!(view.items[1].title, UNTITLED);
        assert_eq!(view.items[1].badge.as_ref().unwrap().accent, Accent::Emerald);
        assert_eq!(view.items[1].copy_text, "");

        let footer = view.footer.unwrap();
        assert_eq!(footer.agent_name, "Notion Power Agent");
        assert_eq!(footer.timestamp, "Jun 11, 2024, 12:00 PM");
    }

    #[test]
    fn test_empty_result_renders_nothing() {
        let view = ResultView::new(&AgentResult::default(), None);
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let result = AgentResult {
            summary: Some(String::new()),
            data: Some(ResultData {
                action_type: Some("search".into()),
                page_title: Some(String::new()),
                page_url: Some(String::new()),
                details: Some(String::new()),
            }),
            items: vec![],
        };
        let view = ResultView::new(&result, None);
        assert!(view.summary.is_none());
        assert!(view.details.is_empty());
        assert!(view.page.is_none());
        assert!(view.is_empty());
    }

    #[test]
    fn test_badge_requires_summary() {
        let result = AgentResult {
            summary: Some("Done".into()),
            data: Some(ResultData::default()),
            items: vec![],
        };
        let view = ResultView::new(&result, None);
        assert_eq!(view.summary.unwrap().action, None);
    }

    #[test]
    fn test_page_link_without_title() {
        let result = AgentResult {
            data: Some(ResultData {
                page_url: Some("https://notion.so/x".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let page = ResultView::new(&result, None).page.unwrap();
        assert_eq!(page.title, None);
        assert_eq!(page.url.as_deref(), Some("https://notion.so/x"));
    }

    #[test]
    fn test_blank_item_title_is_untitled() {
        let result = AgentResult {
            items: vec![ResultItem {
                title: Some(String::new()),
                url: Some(String::new()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let view = ResultView::new(&result, None);
        assert_eq!(view.items[0].title, UNTITLED);
        assert_eq!(view.items[0].url, None);
        assert_eq!(view.items[0].copy_text, "");
    }

    #[test]
    fn test_copy_text_falls_back_to_title() {
        let item = ResultItem {
            title: Some("Roadmap".into()),
            ..Default::default()
        };
        let view = ResultView::new(
            &AgentResult {
                items: vec![item],
                ..Default::default()
            },
            None,
        );
        assert_eq!(view.items[0].copy_text, "Roadmap");
        assert_eq!(view.items[0].url, None);
    }

    #[test]
    fn test_footer_needs_timestamp() {
        let metadata = ResponseMetadata {
            agent_name: Some("Notion Power Agent".into()),
            timestamp: None,
        };
        let view = ResultView::new(&full_result(), Some(&metadata));
        assert!(view.footer.is_none());

        let metadata = ResponseMetadata {
            agent_name: None,
            timestamp: Some("2024-06-11T12:00:00Z".into()),
        };
        let view = utc_view(&full_result(), Some(&metadata));
        assert_eq!(view.footer.unwrap().agent_name, DEFAULT_AGENT_LABEL);
    }

    #[test]
    fn test_unparseable_edit_date_kept() {
        let result = AgentResult {
            items: vec![ResultItem {
                last_edited: Some("last week".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let view = ResultView::new(&result, None);
        assert_eq!(view.items[0].edited.as_deref(), Some("last week"));
    }
}
