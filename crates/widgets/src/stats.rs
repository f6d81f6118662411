use fwd_core::Message;
use fwd_renderer::ChartSurface;
use fwd_stats::StatsPoller;
use fwd_theme::Theme;
use iced::{
    widget::{button, canvas, column, row, text, Space},
    Alignment, Color, Element, Length,
};

/// The Statistics pane: the rate chart plus a one-line poll status.
#[derive(Debug)]
pub struct StatsWidget {
    chart_height: f32,
}

impl StatsWidget {
    pub fn new(chart_height: f32) -> Self {
        Self { chart_height }
    }

    pub fn view<'a>(
        &'a self,
        surface: &'a ChartSurface,
        poller: &'a StatsPoller,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let chart = canvas(surface)
            .width(Length::Fill)
            .height(self.chart_height);

        let samples = text(format!("{} samples", poller.buffer().len()))
            .size(theme.font_size)
            .color(theme.foreground.with_alpha(0.6).to_iced());

        let error: Element<'a, Message> = match poller.last_error() {
            Some(e) => text(format!("✗ {e}"))
                .size(theme.font_size)
                .color(Color::from_rgb8(0xf3, 0x8b, 0xa8))
                .into(),
            None => Space::new().width(Length::Shrink).into(),
        };

        let toggle = button(text(if poller.is_active() { "Pause" } else { "Resume" }).size(theme.font_size))
            .on_press(Message::PauseToggled);

        let status = row![samples, error, Space::new().width(Length::Fill), toggle]
            .spacing(theme.gap as f32)
            .align_y(Alignment::Center);

        column![chart, status].spacing(theme.gap as f32).into()
    }
}
