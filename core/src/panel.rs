//! Agent list renderer
//!
//! A pure mapping from `(agents, phone, loading)` to a [`PanelView`] that a
//! host can draw with any toolkit, plus the two signals a panel can send back
//! up: a row was selected, or the close affordance was clicked.

use crate::state::Agent;

/// Text shown while the remote list is loading
pub const LOADING_TEXT: &str = "加载中...";
/// Text shown when there is nothing to list
pub const EMPTY_TEXT: &str = "暂无可用助手";
/// Avatar used when an agent has neither an image nor a title
pub const FALLBACK_AVATAR: &str = "🤖";

/// Signals a panel sends to its controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSignal {
    /// A row was clicked; owns a copy of the agent
    Selected(Agent),
    /// The close affordance was clicked
    CloseRequested,
}

/// What the list area shows; exactly one state at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Loading indicator
    Loading,
    /// Empty-state message
    Empty,
    /// One row per agent, in list order
    Rows(Vec<AgentRow>),
}

/// Avatar of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Image URL
    Image(String),
    /// Single character drawn in a badge
    Initial(String),
}

/// One agent row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRow {
    /// Position in the effective list
    pub index: usize,
    /// Title line
    pub title: String,
    /// Optional second line
    pub description: Option<String>,
    /// Avatar
    pub avatar: Avatar,
    agent: Agent,
}

impl AgentRow {
    fn new(index: usize, agent: &Agent) -> Self {
        let avatar = match agent.avatar.as_deref().filter(|a| !a.is_empty()) {
            Some(url) => Avatar::Image(url.to_string()),
            None => Avatar::Initial(default_avatar(&agent.title)),
        };

        Self {
            index,
            title: agent.title.clone(),
            description: agent.description.clone().filter(|d| !d.is_empty()),
            avatar,
            agent: agent.clone(),
        }
    }

    /// Signal for a click on this row
    pub fn select(&self) -> PanelSignal {
        PanelSignal::Selected(self.agent.clone())
    }
}

/// Always-visible footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFooter {
    /// Phone number as displayed
    pub phone: String,
    /// Dial link for the phone number
    pub dial_href: String,
}

/// Everything a host needs to draw the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// List area
    pub body: PanelBody,
    /// Footer
    pub footer: PanelFooter,
}

impl PanelView {
    /// Signal for a click on the row at `index`
    pub fn click_row(&self, index: usize) -> Option<PanelSignal> {
        match &self.body {
            PanelBody::Rows(rows) => rows.get(index).map(AgentRow::select),
            PanelBody::Loading | PanelBody::Empty => None,
        }
    }

    /// Signal for a click on the close affordance
    pub fn click_close(&self) -> PanelSignal {
        PanelSignal::CloseRequested
    }
}

/// Resolve the panel for the given inputs
pub fn render_panel(agents: &[Agent], phone: &str, loading: bool) -> PanelView {
    let body = if loading {
        PanelBody::Loading
    } else if agents.is_empty() {
        PanelBody::Empty
    } else {
        PanelBody::Rows(
            agents
                .iter()
                .enumerate()
                .map(|(index, agent)| AgentRow::new(index, agent))
                .collect(),
        )
    };

    PanelView {
        body,
        footer: PanelFooter {
            phone: phone.to_string(),
            dial_href: dial_href(phone),
        },
    }
}

fn default_avatar(title: &str) -> String {
    title
        .chars()
        .next()
        .map(|c| c.to_string())
        .unwrap_or_else(|| FALLBACK_AVATAR.to_string())
}

fn dial_href(phone: &str) -> String {
    let number: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Agent> {
        vec![
            Agent::new("Bot A", "https://a").with_description("first"),
            Agent::new("Bot B", "https://b").with_avatar("https://b/avatar.png"),
        ]
    }

    #[test]
    fn test_loading_has_priority() {
        let view = render_panel(&sample(), "123", true);
        assert_eq!(view.body, PanelBody::Loading);
        assert!(view.click_row(0).is_none());
    }

    #[test]
    fn test_empty_when_not_loading() {
        let view = render_panel(&[], "123", false);
        assert_eq!(view.body, PanelBody::Empty);
    }

    #[test]
    fn test_rows_in_list_order() {
        let view = render_panel(&sample(), "123", false);
        let PanelBody::Rows(rows) = &view.body else {
            panic!("expected rows");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Bot A");
        assert_eq!(rows[0].description.as_deref(), Some("first"));
        assert_eq!(rows[0].avatar, Avatar::Initial("B".to_string()));
        assert_eq!(
            rows[1].avatar,
            Avatar::Image("https://b/avatar.png".to_string())
        );
    }

    #[test]
    fn test_click_row_yields_copy() {
        let agents = sample();
        let view = render_panel(&agents, "123", false);

        let Some(PanelSignal::Selected(mut picked)) = view.click_row(1) else {
            panic!("expected selection");
        };
        assert_eq!(picked, agents[1]);

        picked.title.push_str(" (edited)");
        assert_eq!(view.click_row(1), Some(PanelSignal::Selected(agents[1].clone())));
        assert!(view.click_row(2).is_none());
    }

    #[test]
    fn test_footer_always_rendered() {
        for loading in [true, false] {
            let view = render_panel(&[], "400 123 4567", loading);
            assert_eq!(view.footer.phone, "400 123 4567");
            assert_eq!(view.footer.dial_href, "tel:4001234567");
            assert_eq!(view.click_close(), PanelSignal::CloseRequested);
        }
    }

    #[test]
    fn test_untitled_agent_gets_fallback_avatar() {
        let view = render_panel(&[Agent::new("", "https://x")], "1", false);
        let PanelBody::Rows(rows) = &view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].avatar, Avatar::Initial(FALLBACK_AVATAR.to_string()));
    }
}
