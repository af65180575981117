use crate::config::{messages, selectors};
use crate::services::api::{GithubClient, RepositoryRecord};
use crate::services::{fetch_repositories, FetchOutcome};
use crate::view::{Element, ElementId, Marker, Node, View, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Project One",
        description: "This is the first project. It's about making things work.",
        link: "#",
    },
    Project {
        title: "Project Two",
        description: "This is the second project. It's about making things look good.",
        link: "#",
    },
    Project {
        title: "Project Three",
        description: "This is the third project. It's about making things fast and efficient.",
        link: "#",
    },
];

/// Display-ready contents of one project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub link: String,
    pub link_label: &'static str,
}

impl From<&Project> for Card {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.to_string(),
            description: project.description.to_string(),
            link: project.link.to_string(),
            link_label: messages::STATIC_LINK_LABEL,
        }
    }
}

impl From<RepositoryRecord> for Card {
    fn from(record: RepositoryRecord) -> Self {
        let description = record
            .description
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| messages::MISSING_DESCRIPTION.to_string());
        Self {
            title: record.name,
            description,
            link: record.html_url,
            link_label: messages::REMOTE_LINK_LABEL,
        }
    }
}

impl Card {
    pub fn to_node(&self) -> Node {
        Element::new("div")
            .with_class(selectors::PROJECT_CARD_CLASS)
            .with_child(Element::new("h3").with_text(self.title.clone()))
            .with_child(Element::new("p").with_text(self.description.clone()))
            .with_child(
                Element::new("a")
                    .with_attribute("href", self.link.clone())
                    .with_attribute("target", "_blank")
                    .with_text(self.link_label),
            )
            .into()
    }
}

pub fn static_cards() -> Vec<Card> {
    PROJECTS.iter().map(Card::from).collect()
}

/// What the projects container should show after a fetch settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Cards(Vec<Card>),
    Error,
}

impl From<FetchOutcome> for Listing {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Loaded(records) => {
                Listing::Cards(records.into_iter().map(Card::from).collect())
            }
            FetchOutcome::Failed => Listing::Error,
        }
    }
}

/// Owns the contents of the projects container. Every write replaces the
/// container's children, so it never shows a mix of states.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRenderer {
    container: ElementId,
}

impl ProjectRenderer {
    pub fn locate<V: View>(view: &V) -> Result<Self, ViewError> {
        let container = view.find_first(Marker::Id(selectors::PROJECTS_CONTAINER_ID))?;
        Ok(Self { container })
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn render_static<V: View>(&self, view: &mut V) -> Result<Vec<Card>, ViewError> {
        let cards = static_cards();
        self.render_cards(view, &cards)?;
        Ok(cards)
    }

    pub fn show_loading<V: View>(&self, view: &mut V) -> Result<(), ViewError> {
        view.set_contents(
            self.container,
            vec![Element::new("p")
                .with_class(selectors::LOADING_CLASS)
                .with_text(messages::LOADING)
                .into()],
        )
    }

    pub fn show_error<V: View>(&self, view: &mut V) -> Result<(), ViewError> {
        view.set_contents(
            self.container,
            vec![Element::new("p")
                .with_class(selectors::ERROR_CLASS)
                .with_text(messages::FETCH_FAILED)
                .into()],
        )
    }

    pub fn render_cards<V: View>(&self, view: &mut V, cards: &[Card]) -> Result<(), ViewError> {
        view.set_contents(self.container, cards.iter().map(Card::to_node).collect())
    }

    pub fn render_listing<V: View>(&self, view: &mut V, listing: &Listing) -> Result<(), ViewError> {
        match listing {
            Listing::Cards(cards) => self.render_cards(view, cards),
            Listing::Error => self.show_error(view),
        }
    }

    /// Renders a settled fetch and returns what was rendered.
    pub fn render_outcome<V: View>(
        &self,
        view: &mut V,
        outcome: FetchOutcome,
    ) -> Result<Listing, ViewError> {
        let listing = Listing::from(outcome);
        self.render_listing(view, &listing)?;
        Ok(listing)
    }

    /// Loading placeholder, one fetch, then cards or the error message.
    pub async fn load_remote<V: View>(
        &self,
        view: &mut V,
        client: &GithubClient,
        user: &str,
    ) -> Result<Listing, ViewError> {
        self.show_loading(view)?;
        let outcome = fetch_repositories(client, user).await;
        self.render_outcome(view, outcome)
    }
}
