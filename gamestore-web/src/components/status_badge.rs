use gamestore_core::OrderStatus;
use gamestore_core::orders::{BadgeIcon, BadgeTone};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBadgeProps {
    pub status: OrderStatus,
}

const fn glyph(icon: BadgeIcon) -> &'static str {
    match icon {
        BadgeIcon::Clock => "⏱",
        BadgeIcon::Refresh => "↻",
        BadgeIcon::Truck => "🚚",
        BadgeIcon::Check => "✓",
        BadgeIcon::Ban => "⊘",
        BadgeIcon::Neutral => "•",
    }
}

const fn tone_class(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Yellow => "badge-warning",
        BadgeTone::Blue => "badge-info",
        BadgeTone::Indigo => "badge-primary",
        BadgeTone::Green => "badge-success",
        BadgeTone::Red => "badge-error",
        BadgeTone::Gray => "badge-neutral",
    }
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let badge = props.status.badge();
    html! {
        <span
            class={classes!("badge", "gap-1", tone_class(badge.tone), format!("tone-{}", badge.tone.name()))}
            data-icon={badge.icon.name()}
        >
            <span aria-hidden="true">{ glyph(badge.icon) }</span>
            { props.status.label() }
        </span>
    }
}
