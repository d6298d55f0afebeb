/// Toolbar popup: type a key to open it, or pick a recent one

use crate::bridge::{close_window, ChromeTabs, SyncStorage};
use crate::config::GoConfig;
use crate::recent::{open_go_link, RecentKeys, RecentKeysStore};
use crate::ui::components::RecentChipButton;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let recent = use_state(RecentKeys::default);
    let key_input = use_state(String::new);

    // Show recent keys on mount
    {
        let recent = recent.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let store = RecentKeysStore::new(SyncStorage, GoConfig::default().recent_limit);
                recent.set(store.load_or_empty().await);
            });
            || ()
        });
    }

    let open_key = {
        let recent = recent.clone();
        Callback::from(move |raw: String| {
            let recent = recent.clone();
            spawn_local(async move {
                let config = GoConfig::default();
                let store = RecentKeysStore::new(SyncStorage, config.recent_limit);

                if let Some(keys) = open_go_link(&ChromeTabs, &store, &config.redirect_base, &raw).await {
                    recent.set(keys);
                    close_window();
                }
            });
        })
    };

    let on_input = {
        let key_input = key_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                key_input.set(input.value());
            }
        })
    };

    let on_submit = {
        let key_input = key_input.clone();
        let open_key = open_key.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            open_key.emit((*key_input).clone());
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"go/"}</h1>

            <form class="go-form" onsubmit={on_submit}>
                <input
                    type="text"
                    placeholder="key"
                    value={(*key_input).clone()}
                    oninput={on_input}
                    class="key-input"
                />
            </form>

            if !recent.is_empty() {
                <section class="recent-section">
                    <h2 class="recent-title">{"Recent"}</h2>
                    <div class="recent-keys">
                        {for recent.chips().into_iter().map(|chip| html! {
                            <RecentChipButton chip={chip} onclick={open_key.clone()} />
                        })}
                    </div>
                </section>
            }
        </div>
    }
}
