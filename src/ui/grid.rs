/// Thumbnail grid
///
/// Each cell is a button carrying `Message::Select(id)` for its image, so
/// picking a reference dispatches on identity rather than on a captured
/// closure.
use iced::widget::{button, column, image, text, Column, Row};
use iced::{Alignment, Element, Length};

use crate::state::data::{ImageId, Selection};
use crate::state::session::Session;
use crate::Message;

/// Layout knobs for the grid
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub columns: usize,
    pub thumbnail_size: u32,
    /// False while a folder is loading
    pub interactive: bool,
}

/// Build the grid in working-set order.
///
/// `handles` is indexed by `ImageId`, like the session's tables.
pub fn thumbnail_grid<'a>(
    session: &'a Session,
    handles: &'a [image::Handle],
    layout: GridLayout,
) -> Element<'a, Message> {
    let columns = layout.columns.max(1);
    let mut grid = Column::new().spacing(10);

    for chunk in session.working_set().chunks(columns) {
        let mut row = Row::new().spacing(10);
        for &id in chunk {
            row = row.push(cell(session, handles, id, layout));
        }
        grid = grid.push(row);
    }

    grid.into()
}

fn cell<'a>(
    session: &'a Session,
    handles: &'a [image::Handle],
    id: ImageId,
    layout: GridLayout,
) -> Element<'a, Message> {
    let size = layout.thumbnail_size as f32;
    let filename = session
        .record(id)
        .map(|record| record.filename.as_str())
        .unwrap_or("?");

    let thumbnail: Element<'a, Message> = match handles.get(id.index()) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into(),
        None => text("…").width(Length::Fixed(size)).into(),
    };

    let style: fn(&iced::Theme, button::Status) -> button::Style =
        if session.selection() == Selection::Selected(id) {
            button::primary
        } else {
            button::text
        };
    let thumb_button = button(thumbnail)
        .padding(2)
        .style(style)
        .on_press_maybe(layout.interactive.then_some(Message::Select(id)));

    let distance = session
        .distance_of(id)
        .map(|d| format!("{d:.3}"))
        .unwrap_or_default();

    column![
        thumb_button,
        text(filename).size(11).width(Length::Fixed(size + 4.0)),
        text(distance).size(10),
    ]
    .spacing(2)
    .align_x(Alignment::Center)
    .into()
}
