//! Zellij plugin entry point.
//!
//! Thin shim between the Zellij host and the `popcorn` library: it maps host
//! events to [`popcorn::Event`]s, runs them through [`handle_event`], and
//! carries out the returned [`Action`]s with host calls (web requests, pane
//! renames, worker messages).

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Once;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use popcorn::app::Focus;
use popcorn::omdb::OmdbClient;
use popcorn::request::PendingRequests;
use popcorn::worker::{PopcornWorker, WorkerMessage, WorkerResponse};
use popcorn::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(WorkerShim, popcorn_worker, POPCORN_WORKER);

/// Name the worker is registered under (`popcorn_worker` minus `_worker`).
const WORKER_NAME: &str = "popcorn";

struct State {
    app: popcorn::AppState,

    client: OmdbClient,

    /// Catalog requests awaiting a `WebRequestResult`.
    pending: PendingRequests,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: popcorn::initialize(&config),
            client: OmdbClient::new(config.search_endpoint, config.api_key),
            pending: PendingRequests::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        popcorn::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(storage_key = %config.storage_key, endpoint = %config.search_endpoint, "parsed configuration");
        self.app = popcorn::initialize(&config);
        self.client = OmdbClient::new(config.search_endpoint.clone(), config.api_key.clone());

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match self.pending.resolve(&context, status, &body) {
                    Some(settled) => Event::FetchSettled(settled),
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: status == PermissionStatus::Granted,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        popcorn::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorUp);
        }

        if self.app.focus == Focus::Search {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::CursorDown,
                BareKey::Up => Event::CursorUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Left | BareKey::Char('h') => Event::RatingPreviewDown,
            BareKey::Right | BareKey::Char('l') => Event::RatingPreviewUp,
            BareKey::Tab => Event::SwitchList,
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('o' | ' ') => Event::ToggleSelected,
            BareKey::Char('d' | 'x') => Event::RemoveSelected,
            BareKey::Char('r') => Event::CommitPreview,
            BareKey::Char('a') => Event::AddWatched,
            BareKey::Char('[') => Event::ToggleLeftPanel,
            BareKey::Char(']') => Event::ToggleRightPanel,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char(c) => {
                let digit = c.to_digit(10)?;
                #[allow(clippy::cast_possible_truncation)]
                let rating = if digit == 0 { 10 } else { digit as u8 };
                Event::RateDigit(rating)
            }
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(kind = message.kind(), payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch { request, token } => {
                let url = self.client.request_url(&request);
                tracing::debug!(kind = request.kind(), request_id = token.id(), "issuing catalog request");
                let context = self.pending.track(request, token);
                tracing::trace!(in_flight = self.pending.len(), "request registered");
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::SetPaneTitle(title) => {
                rename_plugin_pane(get_plugin_ids().plugin_id, title);
            }
            Action::PostToWorker(message) => Self::post_worker_message(&message),
        }
    }
}

/// Set up on the first message; the worker does not see the plugin's
/// configuration, so it traces at the default level.
static WORKER_TRACING: Once = Once::new();

/// Host-facing worker: decodes requests, delegates to [`PopcornWorker`] and
/// posts the response back to the plugin.
#[derive(Default, Serialize, Deserialize)]
struct WorkerShim {
    #[serde(skip)]
    worker: PopcornWorker,
}

impl ZellijWorker<'_> for WorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        WORKER_TRACING.call_once(|| popcorn::observability::init_tracing(&Config::default()));

        if message != WORKER_NAME {
            return;
        }
        if let Some(response) = self.worker.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                worker_name: None,
                name: WORKER_NAME.to_string(),
                payload: response,
            });
        }
    }
}
