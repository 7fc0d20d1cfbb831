//! In-memory driver for unit and scenario tests.
//!
//! [`MockDriver`] models a page as a flat set of nodes keyed by the canonical
//! form of the reference that resolves them (the `Display` form of [`By`]).
//! There is no CSS engine: a [`By::TestId`] or [`By::Css`] reference resolves
//! the nodes installed under the same canonical key, and a [`By::Text`]
//! reference scans node text content for an exact trimmed match.
//!
//! Tests script page behavior by attaching [`Effect`]s to click triggers:
//!
//! ```ignore
//! let driver = MockDriver::new();
//! driver.install(&By::test_id("notifications-toggle"), Node::visible(""));
//! driver.install(&By::test_id("notifications-status"), Node::visible("OFF"));
//! driver.on_click(
//!     MockDriver::trigger(&By::test_id("notifications-toggle"), None),
//!     vec![Effect::ToggleText(
//!         By::test_id("notifications-status"),
//!         "OFF".into(),
//!         "ON".into(),
//!     )],
//! );
//! ```
//!
//! A node with text content gets the trigger key `"<key>::<text>"`, falling
//! back to `"<key>"`; this lets a list of options (all sharing one reference)
//! carry distinct click behavior per label. [`Effect::Delayed`] applies its
//! inner effect from a spawned timer, which is how tests exercise the
//! eventual-consistency polling in the base screen abstraction.

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::selector::By;

use super::{Driver, ElementHandle, ElementState, RouteResponse};

/// Poll interval used by the mock's own `wait_for` loop.
const WAIT_POLL: Duration = Duration::from_millis(10);

// ============================================================================
// Node
// ============================================================================

/// A scripted page node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Whether the node is currently visible.
    pub visible: bool,

    /// Text content, if any.
    pub text: Option<String>,

    /// Input value, if filled.
    pub value: Option<String>,
}

impl Node {
    /// Creates a visible node with the given text (empty text becomes none).
    #[must_use]
    pub fn visible(text: &str) -> Self {
        Self {
            visible: true,
            text: non_empty(text),
            value: None,
        }
    }

    /// Creates a hidden node with the given text.
    #[must_use]
    pub fn hidden(text: &str) -> Self {
        Self {
            visible: false,
            text: non_empty(text),
            value: None,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// A node installed in the page, with identity and resolution key.
#[derive(Debug, Clone)]
struct InstalledNode {
    id: String,
    key: String,
    node: Node,
}

// ============================================================================
// Effect
// ============================================================================

/// Scripted page reaction to a click.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Makes the nodes under a reference visible.
    Show(By),

    /// Hides the nodes under a reference.
    Hide(By),

    /// Sets the text of the nodes under a reference.
    SetText(By, String),

    /// Swaps the text of the nodes under a reference between two values.
    ///
    /// Used for toggle controls: if the current text equals the first value
    /// it becomes the second, otherwise the first.
    ToggleText(By, String, String),

    /// Replaces every node under a reference with visible text nodes.
    ///
    /// Used for list re-renders (price lists after a currency switch).
    ReplaceAll(By, Vec<String>),

    /// Records a navigation to the given URL.
    Navigate(String),

    /// Branches on whether a route stub matching the pattern is installed.
    IfRouted {
        /// Substring matched against installed route patterns.
        pattern: String,
        /// Effects applied when a matching stub exists.
        then: Vec<Effect>,
        /// Effects applied otherwise.
        otherwise: Vec<Effect>,
    },

    /// Applies the inner effect after a delay, from a spawned task.
    Delayed(Duration, Box<Effect>),
}

// ============================================================================
// State
// ============================================================================

#[derive(Default)]
struct MockState {
    nodes: Vec<InstalledNode>,
    effects: HashMap<String, Vec<Effect>>,
    routes: Vec<(String, RouteResponse)>,
    navigations: Vec<String>,
    clicks: Vec<String>,
    /// `None` means the network never settles.
    idle_after: Option<Duration>,
    screenshot_fails: bool,
}

// ============================================================================
// MockDriver
// ============================================================================

/// Scriptable in-memory [`Driver`] implementation.
#[derive(Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Creates an empty mock page.
    #[must_use]
    pub fn new() -> Self {
        let driver = Self::default();
        driver.state.lock().idle_after = Some(Duration::ZERO);
        driver
    }

    /// Canonical trigger key for a clickable node.
    #[must_use]
    pub fn trigger(by: &By, text: Option<&str>) -> String {
        match text {
            Some(text) => format!("{by}::{text}"),
            None => by.to_string(),
        }
    }

    // ========================================================================
    // Scripting
    // ========================================================================

    /// Installs a node under the canonical key of `by`.
    pub fn install(&self, by: &By, node: Node) {
        self.state.lock().nodes.push(InstalledNode {
            id: Uuid::new_v4().to_string(),
            key: by.to_string(),
            node,
        });
    }

    /// Installs one visible text node per label under the same reference.
    pub fn install_many(&self, by: &By, texts: &[&str]) {
        for text in texts {
            self.install(by, Node::visible(text));
        }
    }

    /// Attaches click effects to a trigger key (see [`MockDriver::trigger`]).
    pub fn on_click(&self, trigger: impl Into<String>, effects: Vec<Effect>) {
        self.state.lock().effects.insert(trigger.into(), effects);
    }

    /// Makes the network never settle (navigation waits will time out).
    pub fn set_never_idle(&self) {
        self.state.lock().idle_after = None;
    }

    /// Makes the network settle after the given delay.
    pub fn set_idle_after(&self, delay: Duration) {
        self.state.lock().idle_after = Some(delay);
    }

    /// Makes screenshot capture fail.
    pub fn fail_screenshots(&self) {
        self.state.lock().screenshot_fails = true;
    }

    // ========================================================================
    // Observations
    // ========================================================================

    /// Returns the navigation log, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }

    /// Returns the click log (trigger keys), in order.
    #[must_use]
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    /// Returns the installed route stubs.
    #[must_use]
    pub fn routes(&self) -> Vec<(String, RouteResponse)> {
        self.state.lock().routes.clone()
    }

    /// Returns the filled value of the first node under `by`.
    #[must_use]
    pub fn value_of(&self, by: &By) -> Option<String> {
        let key = by.to_string();
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .find(|n| n.key == key)
            .and_then(|n| n.node.value.clone())
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn matching_ids(state: &MockState, by: &By) -> Vec<(String, bool, Option<String>)> {
        match by {
            By::Text(wanted) => state
                .nodes
                .iter()
                .filter(|n| {
                    n.node
                        .text
                        .as_deref()
                        .is_some_and(|t| t.trim() == wanted.trim())
                })
                .map(|n| (n.id.clone(), n.node.visible, n.node.text.clone()))
                .collect(),
            _ => {
                let key = by.to_string();
                state
                    .nodes
                    .iter()
                    .filter(|n| n.key == key)
                    .map(|n| (n.id.clone(), n.node.visible, n.node.text.clone()))
                    .collect()
            }
        }
    }

    fn apply_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&self, effect: Effect) {
        match effect {
            Effect::Show(by) => self.for_each_node(&by, |n| n.visible = true),
            Effect::Hide(by) => self.for_each_node(&by, |n| n.visible = false),
            Effect::SetText(by, text) => {
                self.for_each_node(&by, |n| n.text = Some(text.clone()));
            }
            Effect::ToggleText(by, a, b) => self.for_each_node(&by, |n| {
                let current = n.text.as_deref().unwrap_or_default();
                n.text = Some(if current == a { b.clone() } else { a.clone() });
            }),
            Effect::ReplaceAll(by, texts) => {
                let key = by.to_string();
                let mut state = self.state.lock();
                state.nodes.retain(|n| n.key != key);
                for text in texts {
                    state.nodes.push(InstalledNode {
                        id: Uuid::new_v4().to_string(),
                        key: key.clone(),
                        node: Node::visible(&text),
                    });
                }
            }
            Effect::Navigate(url) => self.state.lock().navigations.push(url),
            Effect::IfRouted {
                pattern,
                then,
                otherwise,
            } => {
                let routed = {
                    let state = self.state.lock();
                    state.routes.iter().any(|(p, _)| p.contains(&pattern))
                };
                self.apply_effects(if routed { then } else { otherwise });
            }
            Effect::Delayed(delay, inner) => {
                let driver = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    driver.apply_effect(*inner);
                });
            }
        }
    }

    fn for_each_node(&self, by: &By, mut f: impl FnMut(&mut Node)) {
        let key = by.to_string();
        let mut state = self.state.lock();
        for installed in state.nodes.iter_mut().filter(|n| n.key == key) {
            f(&mut installed.node);
        }
    }

    fn state_reached(&self, by: &By, state: ElementState) -> Option<ElementHandle> {
        let guard = self.state.lock();
        let matches = Self::matching_ids(&guard, by);
        match state {
            ElementState::Attached => matches
                .first()
                .map(|(id, _, _)| ElementHandle::new(id.clone(), by.clone())),
            ElementState::Visible => matches
                .iter()
                .find(|(_, visible, _)| *visible)
                .map(|(id, _, _)| ElementHandle::new(id.clone(), by.clone())),
            ElementState::Hidden => {
                if matches.iter().all(|(_, visible, _)| !visible) {
                    Some(ElementHandle::new("absent", by.clone()))
                } else {
                    None
                }
            }
        }
    }

    fn find_node<R>(&self, handle: &ElementHandle, f: impl FnOnce(&Node) -> R) -> Result<R> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .find(|n| n.id == handle.id)
            .map(|n| f(&n.node))
            .ok_or_else(|| Error::driver(format!("stale handle: {handle}")))
    }
}

// ============================================================================
// Driver Implementation
// ============================================================================

#[async_trait]
impl Driver for MockDriver {
    async fn resolve(&self, by: &By) -> Result<Option<ElementHandle>> {
        let state = self.state.lock();
        Ok(Self::matching_ids(&state, by)
            .first()
            .map(|(id, _, _)| ElementHandle::new(id.clone(), by.clone())))
    }

    async fn resolve_all(&self, by: &By) -> Result<Vec<ElementHandle>> {
        let state = self.state.lock();
        Ok(Self::matching_ids(&state, by)
            .into_iter()
            .map(|(id, _, _)| ElementHandle::new(id, by.clone()))
            .collect())
    }

    async fn click(&self, handle: &ElementHandle) -> Result<()> {
        // Trigger keys derive from the node's installed key, so a node
        // resolved through By::Text still fires the effects attached to
        // its declaring reference.
        let (key, visible, text) = {
            let state = self.state.lock();
            let node = state
                .nodes
                .iter()
                .find(|n| n.id == handle.id)
                .ok_or_else(|| Error::driver(format!("stale handle: {handle}")))?;
            (node.key.clone(), node.node.visible, node.node.text.clone())
        };
        if !visible {
            return Err(Error::interaction(
                handle.resolved_from.to_string(),
                "element is not visible",
            ));
        }

        let trigger = match text.as_deref() {
            Some(text) => format!("{key}::{text}"),
            None => key.clone(),
        };
        let fallback = key;
        debug!(trigger = %trigger, "Mock click");

        let effects = {
            let mut state = self.state.lock();
            state.clicks.push(trigger.clone());
            state
                .effects
                .get(&trigger)
                .or_else(|| state.effects.get(&fallback))
                .cloned()
        };
        if let Some(effects) = effects {
            self.apply_effects(effects);
        }
        Ok(())
    }

    async fn fill(&self, handle: &ElementHandle, value: &str) -> Result<()> {
        let id = handle.id.clone();
        let mut state = self.state.lock();
        let node = state
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::driver(format!("stale handle: {handle}")))?;
        node.node.value = Some(value.to_string());
        Ok(())
    }

    async fn read_text(&self, handle: &ElementHandle) -> Result<Option<String>> {
        self.find_node(handle, |n| n.text.clone())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool> {
        self.find_node(handle, |n| n.visible)
    }

    async fn wait_for(
        &self,
        by: &By,
        state: ElementState,
        timeout: Duration,
    ) -> Result<ElementHandle> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(handle) = self.state_reached(by, state) {
                return Ok(handle);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::timeout(
                    format!("wait_for {by} to be {state:?}"),
                    timeout.as_millis() as u64,
                ));
            }
            tokio::time::sleep(WAIT_POLL).await;
        }
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<()> {
        let idle_after = self.state.lock().idle_after;
        match idle_after {
            Some(delay) if delay <= timeout => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            _ => {
                tokio::time::sleep(timeout).await;
                Err(Error::timeout(
                    "wait_for_network_idle",
                    timeout.as_millis() as u64,
                ))
            }
        }
    }

    async fn route(&self, pattern: &str, response: RouteResponse) -> Result<()> {
        self.state
            .lock()
            .routes
            .push((pattern.to_string(), response));
        Ok(())
    }

    async fn screenshot(&self, name: &str) -> Result<Vec<u8>> {
        let fails = self.state.lock().screenshot_fails;
        if fails {
            return Err(Error::driver(format!("screenshot {name} failed")));
        }
        Ok(format!("PNG:{name}").into_bytes())
    }
}

// ============================================================================
// Tests
// ============================================================================
