//! Swipe actions on list rows.

use std::fmt;
use std::sync::Arc;

use crate::config::{Color, EditConfiguration};
use crate::model::{IndexPath, ListItem};

/// The row edge an action is revealed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeEdge {
    Leading,
    Trailing,
}

/// Visual weight of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeActionStyle {
    #[default]
    Normal,
    Destructive,
}

/// Handler of a custom swipe action.
pub type SwipeHandler = Arc<dyn Fn(IndexPath) + Send + Sync>;

/// What confirming an action does.
#[derive(Clone)]
pub enum SwipeActionKind {
    /// Report the row as deleted through the list's `row_deleted` signal.
    Delete,
    /// Run the handler with the row's path.
    Custom(SwipeHandler),
}

impl fmt::Debug for SwipeActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("Delete"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One button revealed by swiping a row.
#[derive(Debug, Clone)]
pub struct SwipeAction {
    pub title: String,
    pub style: SwipeActionStyle,
    pub background_color: Option<Color>,
    pub image: Option<String>,
    pub kind: SwipeActionKind,
}

impl SwipeAction {
    /// A normal action running `handler`.
    pub fn custom<F>(title: impl Into<String>, handler: F) -> Self
    where
        F: Fn(IndexPath) + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            style: SwipeActionStyle::Normal,
            background_color: None,
            image: None,
            kind: SwipeActionKind::Custom(Arc::new(handler)),
        }
    }

    /// The destructive delete action styled by `edit`.
    pub fn delete(edit: &EditConfiguration) -> Self {
        Self {
            title: edit.delete_button_title.clone(),
            style: SwipeActionStyle::Destructive,
            background_color: edit.delete_button_background_color,
            image: edit.delete_button_image.clone(),
            kind: SwipeActionKind::Delete,
        }
    }

    pub fn with_style(mut self, style: SwipeActionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.style == SwipeActionStyle::Destructive
    }
}

/// The actions revealed on one edge of a row.
#[derive(Debug, Clone, Default)]
pub struct SwipeActionsConfiguration {
    pub actions: Vec<SwipeAction>,
    /// Whether a full swipe performs the first action.
    pub performs_first_action_with_full_swipe: bool,
}

impl SwipeActionsConfiguration {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Produces the actions of a row from its path and item.
pub type SwipeActionProvider<I> = Arc<dyn Fn(IndexPath, &I) -> Vec<SwipeAction> + Send + Sync>;

#[derive(Clone)]
enum ProviderKind<I> {
    /// Built-in delete: one destructive action on editable rows only.
    Delete,
    Custom(SwipeActionProvider<I>),
}

#[derive(Clone)]
struct SwipeBinding<I> {
    kind: ProviderKind<I>,
    allow_full_swipe: bool,
}

/// Behavioral wiring of a list: the swipe-action providers of both edges.
///
/// Kept apart from [`LayoutConfiguration`](crate::style::LayoutConfiguration)
/// so that restyling never drops providers.
pub struct BehaviorBindings<I> {
    leading: Option<SwipeBinding<I>>,
    trailing: Option<SwipeBinding<I>>,
}

impl<I> Default for BehaviorBindings<I> {
    fn default() -> Self {
        Self {
            leading: None,
            trailing: None,
        }
    }
}

impl<I> fmt::Debug for BehaviorBindings<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorBindings")
            .field("leading", &self.leading.is_some())
            .field("trailing", &self.trailing.is_some())
            .finish()
    }
}

impl<I: ListItem> BehaviorBindings<I> {
    fn slot(&mut self, edge: SwipeEdge) -> &mut Option<SwipeBinding<I>> {
        match edge {
            SwipeEdge::Leading => &mut self.leading,
            SwipeEdge::Trailing => &mut self.trailing,
        }
    }

    /// Install the built-in delete provider on `edge`.
    pub fn set_delete(&mut self, edge: SwipeEdge, allow_full_swipe: bool) {
        *self.slot(edge) = Some(SwipeBinding {
            kind: ProviderKind::Delete,
            allow_full_swipe,
        });
    }

    /// Install a custom provider on `edge`.
    pub fn set_provider(
        &mut self,
        edge: SwipeEdge,
        allow_full_swipe: bool,
        provider: SwipeActionProvider<I>,
    ) {
        *self.slot(edge) = Some(SwipeBinding {
            kind: ProviderKind::Custom(provider),
            allow_full_swipe,
        });
    }

    /// Remove the provider of `edge`.
    pub fn clear(&mut self, edge: SwipeEdge) {
        *self.slot(edge) = None;
    }

    /// Returns `true` if `edge` has a provider.
    pub fn has_provider(&self, edge: SwipeEdge) -> bool {
        match edge {
            SwipeEdge::Leading => self.leading.is_some(),
            SwipeEdge::Trailing => self.trailing.is_some(),
        }
    }

    /// The actions for the row at `path` holding `item`. Disabled rows get
    /// none, whatever the provider.
    pub fn actions(
        &self,
        edge: SwipeEdge,
        path: IndexPath,
        item: &I,
        edit: &EditConfiguration,
    ) -> SwipeActionsConfiguration {
        let binding = match edge {
            SwipeEdge::Leading => self.leading.as_ref(),
            SwipeEdge::Trailing => self.trailing.as_ref(),
        };
        let Some(binding) = binding.filter(|_| item.is_enabled()) else {
            return SwipeActionsConfiguration::default();
        };

        let actions = match &binding.kind {
            ProviderKind::Delete if item.can_edit() => vec![SwipeAction::delete(edit)],
            ProviderKind::Delete => Vec::new(),
            ProviderKind::Custom(provider) => provider(path, item),
        };
        SwipeActionsConfiguration {
            performs_first_action_with_full_swipe: binding.allow_full_swipe && !actions.is_empty(),
            actions,
        }
    }
}
