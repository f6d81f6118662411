use fwd_core::{Message, Tab};
use iced::{
    widget::{button, row, text},
    Element,
};

/// Statistics / Configuration switcher.
pub fn tab_bar<'a>(current: Tab, size: f32) -> Element<'a, Message> {
    row![
        tab_btn("Statistics", Tab::Statistics, current, size),
        tab_btn("Configuration", Tab::Configuration, current, size),
    ]
    .spacing(4)
    .into()
}

fn tab_btn<'a>(label: &'a str, target: Tab, current: Tab, size: f32) -> Element<'a, Message> {
    let btn = button(text(label).size(size)).on_press(Message::TabSelected(target));
    if target == current {
        btn.style(button::primary).into()
    } else {
        btn.style(button::secondary).into()
    }
}
