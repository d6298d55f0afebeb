/// View-model and operations for the link manager side panel
use crate::api::LinkApi;
use crate::config::GoConfig;
use crate::error::ApiError;
use crate::link::{parse_link_list, LinkPayload, LinkRecord, LinkRow};
use crate::schedule::{Debouncer, Scheduler};
use log::{debug, error, info};
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub const VALIDATION_FAILED: &str = "Key and URL are required";
pub const SAVE_FAILED: &str = "Failed to save. Check console & API.";
pub const DELETE_FAILED: &str = "Failed to delete. Check console & API.";
pub const LIST_FAILED: &str =
    "Failed to load links from app.tawhid.in. Are you logged in and is the API up?";
pub const EDITING_STATUS: &str = "Editing existing link";

/// Blocking confirm/alert prompts of the host page
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Key,
    Url,
    Description,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Create/edit form; the default value is the closed form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkForm {
    pub visible: bool,
    pub mode: FormMode,
    pub editing_key: Option<String>,
    pub key: String,
    pub url: String,
    pub description: String,
    pub status: Option<StatusLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveTarget {
    Create,
    Update(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub target: SaveTarget,
    pub payload: LinkPayload,
}

impl LinkForm {
    pub fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusLine {
            text: text.to_string(),
            is_error,
        });
    }

    /// Trimmed request for the current fields, or the validation message
    pub fn save_request(&self) -> Result<SaveRequest, &'static str> {
        let key = self.key.trim();
        let url = self.url.trim();
        if key.is_empty() || url.is_empty() {
            return Err(VALIDATION_FAILED);
        }

        let target = match (self.mode, self.editing_key.as_deref()) {
            (FormMode::Edit, Some(editing)) if !editing.is_empty() => {
                SaveTarget::Update(editing.to_string())
            }
            _ => SaveTarget::Create,
        };

        Ok(SaveRequest {
            target,
            payload: LinkPayload {
                key: key.to_string(),
                url: url.to_string(),
                description: self.description.trim().to_string(),
            },
        })
    }
}

/// Exactly one of these is shown below the search box
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListState {
    #[default]
    Loading,
    Empty,
    Populated,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelModel {
    pub links: Vec<LinkRecord>,
    pub list: ListState,
    pub form: LinkForm,
    pub search_input: String,
}

impl PanelModel {
    pub fn open_create(&mut self) {
        self.form = LinkForm {
            visible: true,
            ..LinkForm::default()
        };
    }

    pub fn open_edit(&mut self, record: &LinkRecord) {
        self.form = LinkForm {
            visible: true,
            mode: FormMode::Edit,
            editing_key: record.key.clone(),
            key: record.key().to_string(),
            url: record.resolved_url().to_string(),
            description: record.resolved_description().to_string(),
            status: None,
        };
        self.form.set_status(EDITING_STATUS, false);
    }

    /// Hide the form and reset it to an empty create form
    pub fn close(&mut self) {
        self.form = LinkForm::default();
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Key => self.form.key = value,
            FormField::Url => self.form.url = value,
            FormField::Description => self.form.description = value,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.list = ListState::Loading;
    }

    pub fn apply_list_result(&mut self, result: Result<Value, ApiError>) {
        match result {
            Ok(body) => {
                self.links = parse_link_list(body);
                self.list = if self.links.is_empty() {
                    ListState::Empty
                } else {
                    ListState::Populated
                };
            }
            Err(_) => self.list = ListState::Failed(LIST_FAILED.to_string()),
        }
    }

    pub fn search_term(&self) -> &str {
        self.search_input.trim()
    }

    pub fn count_badge(&self) -> String {
        match self.list {
            ListState::Empty => "0".to_string(),
            ListState::Populated => self.links.len().to_string(),
            ListState::Loading | ListState::Failed(_) => "…".to_string(),
        }
    }

    /// Rows to render; empty unless the list is populated
    pub fn rows(&self) -> Vec<(LinkRow, LinkRecord)> {
        match self.list {
            ListState::Populated => self
                .links
                .iter()
                .map(|record| (LinkRow::from(record), record.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Drives a `PanelModel` against the remote API.
///
/// `on_change` runs after every model mutation so the UI can re-render.
/// Overlapping list requests are not fenced: whichever response lands
/// last wins.
pub struct LinkManager<A: LinkApi, D: Dialogs, S: Scheduler> {
    api: A,
    dialogs: D,
    scheduler: S,
    close_delay_ms: u32,
    model: Rc<RefCell<PanelModel>>,
    search: RefCell<Debouncer<S>>,
    close_timer: RefCell<Option<S::Handle>>,
    on_change: Rc<dyn Fn()>,
}

impl<A: LinkApi, D: Dialogs, S: Scheduler> LinkManager<A, D, S> {
    pub fn new(
        api: A,
        dialogs: D,
        scheduler: S,
        config: &GoConfig,
        on_change: impl Fn() + 'static,
    ) -> Self {
        LinkManager {
            api,
            dialogs,
            scheduler,
            close_delay_ms: config.form_close_delay_ms,
            model: Rc::new(RefCell::new(PanelModel::default())),
            search: RefCell::new(Debouncer::new(config.search_debounce_ms)),
            close_timer: RefCell::new(None),
            on_change: Rc::new(on_change),
        }
    }

    pub fn model(&self) -> Ref<'_, PanelModel> {
        self.model.borrow()
    }

    fn update(&self, f: impl FnOnce(&mut PanelModel)) {
        f(&mut *self.model.borrow_mut());
        (self.on_change)();
    }

    pub fn open_create(&self) {
        self.update(PanelModel::open_create);
    }

    pub fn open_edit(&self, record: &LinkRecord) {
        self.update(|m| m.open_edit(record));
    }

    pub fn close(&self) {
        self.update(PanelModel::close);
    }

    pub fn set_field(&self, field: FormField, value: String) {
        self.update(|m| m.set_field(field, value));
    }

    pub async fn fetch_links(&self, term: &str) {
        self.update(PanelModel::begin_fetch);

        let result = self.api.list(term).await;
        if let Err(e) = &result {
            error!("Failed to load links: {}", e);
        }
        self.update(|m| m.apply_list_result(result));
    }

    /// Re-run the list request with whatever is in the search box now
    pub async fn refresh(&self) {
        let term = self.model.borrow().search_term().to_string();
        self.fetch_links(&term).await;
    }

    /// Record a keystroke in the search box and restart the debounce timer.
    ///
    /// `on_fire` receives the trimmed term once input has been idle for the
    /// configured delay; it is expected to start `fetch_links`.
    pub fn search_input(&self, raw: &str, on_fire: impl FnOnce(String) + 'static) {
        self.update(|m| m.search_input = raw.to_string());

        let term = raw.trim().to_string();
        self.search.borrow_mut().call(&self.scheduler, move || {
            debug!("search debounce fired for {:?}", term);
            on_fire(term)
        });
    }

    pub async fn submit(&self) {
        let request = self.model.borrow().form.save_request();
        let request = match request {
            Ok(request) => request,
            Err(message) => {
                self.update(|m| m.form.set_status(message, true));
                return;
            }
        };

        let (pending, done) = match request.target {
            SaveTarget::Create => ("Creating…", "Created ✔"),
            SaveTarget::Update(_) => ("Updating…", "Updated ✔"),
        };
        self.update(|m| m.form.set_status(pending, false));

        let result = match &request.target {
            SaveTarget::Create => self.api.create(&request.payload).await,
            SaveTarget::Update(key) => self.api.update(key, &request.payload).await,
        };

        match result {
            Ok(()) => {
                info!("Saved go/{}", request.payload.key);
                self.update(|m| m.form.set_status(done, false));
                self.refresh().await;
                self.schedule_close();
            }
            Err(e) => {
                error!("Save failed: {}", e);
                self.update(|m| m.form.set_status(SAVE_FAILED, true));
            }
        }
    }

    fn schedule_close(&self) {
        let model = self.model.clone();
        let on_change = self.on_change.clone();
        let handle = self.scheduler.schedule(
            self.close_delay_ms,
            Box::new(move || {
                model.borrow_mut().close();
                on_change();
            }),
        );
        *self.close_timer.borrow_mut() = Some(handle);
    }

    pub async fn delete_link(&self, record: &LinkRecord) {
        let key = record.key().trim().to_string();
        if key.is_empty() {
            return;
        }

        if !self.dialogs.confirm(&format!("Delete go/{}?", key)) {
            debug!("delete of go/{} declined", key);
            return;
        }

        match self.api.delete(&key).await {
            Ok(()) => {
                info!("Deleted go/{}", key);
                self.refresh().await;
            }
            Err(e) => {
                error!("Delete failed: {}", e);
                self.dialogs.alert(DELETE_FAILED);
            }
        }
    }
}
