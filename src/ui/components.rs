/// Reusable UI components

use crate::link::{LinkRecord, LinkRow};
use crate::panel::StatusLine;
use crate::recent::RecentChip;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LinkItemProps {
    pub row: LinkRow,
    pub record: LinkRecord,
    pub on_edit: Callback<LinkRecord>,
    pub on_delete: Callback<LinkRecord>,
}

/// One row of the link list with its Edit and Delete actions
#[function_component(LinkItem)]
pub fn link_item(props: &LinkItemProps) -> Html {
    let row = &props.row;

    let on_edit = props.on_edit.reform({
        let record = props.record.clone();
        move |_: MouseEvent| record.clone()
    });
    let on_delete = props.on_delete.reform({
        let record = props.record.clone();
        move |_: MouseEvent| record.clone()
    });

    html! {
        <div class="link-item">
            <div class="link-top-row">
                <div class="link-key">
                    {&row.key_label}
                    if let Some(hint) = &row.go_hint {
                        <small>{hint}</small>
                    }
                </div>
                <div class="link-actions">
                    <Button onclick={on_edit} variant={ButtonVariant::Secondary} size={ButtonSize::Small}>
                        {"Edit"}
                    </Button>
                    <Button onclick={on_delete} variant={ButtonVariant::Danger} size={ButtonSize::Small}>
                        {"Delete"}
                    </Button>
                </div>
            </div>
            <div class="link-url">{&row.url}</div>
            if let Some(description) = &row.description {
                <div class="link-desc">{description}</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormStatusProps {
    #[prop_or_default]
    pub status: Option<StatusLine>,
}

#[function_component(FormStatus)]
pub fn form_status(props: &FormStatusProps) -> Html {
    match &props.status {
        Some(status) => html! {
            <p class={classes!("form-status", status.is_error.then_some("error"))}>
                {&status.text}
            </p>
        },
        None => html! { <p class="form-status"></p> },
    }
}

#[derive(Properties, PartialEq)]
pub struct RecentChipButtonProps {
    pub chip: RecentChip,
    pub onclick: Callback<String>,
}

/// Quick-access shortcut for a recently opened key
#[function_component(RecentChipButton)]
pub fn recent_chip_button(props: &RecentChipButtonProps) -> Html {
    let onclick = props.onclick.reform({
        let key = props.chip.label.clone();
        move |_: MouseEvent| key.clone()
    });

    html! {
        <button type="button" class="chip" {onclick}>
            <span>{&props.chip.label}</span>
            <small>{&props.chip.hint}</small>
        </button>
    }
}
