/// Side panel UI for managing go-links

use crate::api::HttpLinkApi;
use crate::bridge::BrowserDialogs;
use crate::config::GoConfig;
use crate::link::LinkRecord;
use crate::panel::{FormField, FormMode, LinkManager, ListState};
use crate::schedule::TimeoutScheduler;
use crate::ui::components::{FormStatus, LinkItem};
use patternfly_yew::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

type BrowserLinkManager = LinkManager<HttpLinkApi, BrowserDialogs, TimeoutScheduler>;

fn field_input(manager: &Rc<BrowserLinkManager>, field: FormField) -> Callback<InputEvent> {
    let manager = manager.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            manager.set_field(field, input.value());
        }
    })
}

#[function_component(LinkPanel)]
pub fn link_panel() -> Html {
    let trigger = use_force_update();
    let manager: Rc<BrowserLinkManager> = use_memo((), move |_| {
        let config = GoConfig::default();
        LinkManager::new(
            HttpLinkApi::new(&config.api_base),
            BrowserDialogs,
            TimeoutScheduler,
            &config,
            move || trigger.force_update(),
        )
    });

    // Load the full list on mount
    {
        let manager = manager.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                manager.fetch_links("").await;
            });
            || ()
        });
    }

    let on_search_input = {
        let manager = manager.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let fetcher = manager.clone();
                manager.search_input(&input.value(), move |term| {
                    spawn_local(async move {
                        fetcher.fetch_links(&term).await;
                    });
                });
            }
        })
    };

    let on_new = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.open_create())
    };

    let on_cancel = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.close())
    };

    let on_submit = {
        let manager = manager.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let manager = manager.clone();
            spawn_local(async move {
                manager.submit().await;
            });
        })
    };

    let on_edit = {
        let manager = manager.clone();
        Callback::from(move |record: LinkRecord| manager.open_edit(&record))
    };

    let on_delete = {
        let manager = manager.clone();
        Callback::from(move |record: LinkRecord| {
            let manager = manager.clone();
            spawn_local(async move {
                manager.delete_link(&record).await;
            });
        })
    };

    let on_key_input = field_input(&manager, FormField::Key);
    let on_url_input = field_input(&manager, FormField::Url);
    let on_desc_input = field_input(&manager, FormField::Description);

    let model = manager.model();
    let form = &model.form;

    html! {
        <div class="panel">
            <div class="panel-header">
                <h1 class="panel-title">{"go/links"}</h1>
                <span class="count-badge">{model.count_badge()}</span>
                <Button onclick={on_new} variant={ButtonVariant::Primary}>
                    {"+ New"}
                </Button>
            </div>

            <div class="search-container">
                <input
                    type="text"
                    placeholder="Search keys, URLs, descriptions..."
                    value={model.search_input.clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            if form.visible {
                <section class="form-section">
                    <form class="link-form" onsubmit={on_submit}>
                        <label>
                            {"Key"}
                            <input type="text" value={form.key.clone()} oninput={on_key_input} />
                        </label>
                        <label>
                            {"URL"}
                            <input type="url" value={form.url.clone()} oninput={on_url_input} />
                        </label>
                        <label>
                            {"Description"}
                            <input type="text" value={form.description.clone()} oninput={on_desc_input} />
                        </label>
                        <div class="form-actions">
                            <button type="submit" class="pf-v5-c-button pf-m-primary">
                                {if form.mode == FormMode::Edit { "Update" } else { "Create" }}
                            </button>
                            <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>
                                {"Cancel"}
                            </Button>
                        </div>
                        <FormStatus status={form.status.clone()} />
                    </form>
                </section>
            }

            {match &model.list {
                ListState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading links..."}</p>
                    </div>
                },
                ListState::Empty => html! {
                    <div class="empty-state">
                        <p>{"No links found."}</p>
                    </div>
                },
                ListState::Failed(message) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {message.clone()}
                    </Alert>
                },
                ListState::Populated => html! {
                    <div class="links-list">
                        {for model.rows().into_iter().map(|(row, record)| html! {
                            <LinkItem
                                row={row}
                                record={record}
                                on_edit={on_edit.clone()}
                                on_delete={on_delete.clone()}
                            />
                        })}
                    </div>
                },
            }}
        </div>
    }
}
