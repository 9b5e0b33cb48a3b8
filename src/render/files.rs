use std::num::NonZeroUsize;

use crate::error::{MenuError, Result};
use crate::menu::{compute_window, NavigationState, View};

use super::{truncate, Color, Palette, Point, Rect, Sprite, Surface, TextSize, TextStyle};

/// Upper bound on entries scanned in one listing
pub const MAX_FILES: usize = 256;
/// Rows shown at once
pub const VISIBLE_FILES: usize = 7;
/// Glyphs of the name shown after the marker
pub const NAME_GLYPHS: usize = 16;
/// Amount subtracted from the foreground for folder rows
pub const FOLDER_TINT: u16 = 0x1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Plain,
    Folder,
    /// Pseudo entries such as "> Back" or "New folder"
    Operator,
}

impl FileKind {
    /// Parse the kind column; an empty tag is the end-of-list sentinel
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" => None,
            "folder" => Some(FileKind::Folder),
            "operator" => Some(FileKind::Operator),
            _ => Some(FileKind::Plain),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            FileKind::Plain => "file",
            FileKind::Folder => "folder",
            FileKind::Operator => "operator",
        }
    }

    /// Row color for this kind
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            FileKind::Plain => palette.foreground,
            FileKind::Folder => palette.foreground.dimmed(FOLDER_TINT),
            FileKind::Operator => palette.alert,
        }
    }
}

/// One row of a directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Caller-owned column, usually the full path
    pub reserved: String,
    /// `None` marks the end of the listing
    pub kind: Option<FileKind>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, reserved: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            reserved: reserved.into(),
            kind: Some(kind),
        }
    }

    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Build from the three text columns `[name, reserved, kind]`
    pub fn from_columns([name, reserved, kind]: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            reserved: reserved.to_string(),
            kind: FileKind::from_tag(kind),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind.is_none()
    }
}

/// Count entries before the first sentinel, never more than `MAX_FILES`
pub fn array_size(entries: &[FileEntry]) -> usize {
    entries
        .iter()
        .take(MAX_FILES)
        .take_while(|entry| !entry.is_sentinel())
        .count()
}

/// Paint the visible slice of a listing.
///
/// Rows are colored by kind; the selection only adds the `>` marker.
pub fn list_files<S>(surface: &mut S, entries: &[FileEntry], index: usize, palette: &Palette)
where
    S: Surface + ?Sized,
{
    let width = surface.width() - 20;
    let height = surface.height() - 20;
    let mut sprite = Sprite::new(width, height);
    sprite.fill_rect(Rect::new(0, 0, width, height), palette.background);

    let size = array_size(entries);
    let window = compute_window(index, size, VISIBLE_FILES);
    for (row, i) in window.range().enumerate() {
        let entry = &entries[i];
        let color = entry.kind.map_or(palette.foreground, |kind| kind.color(palette));
        let marker = if i == index { '>' } else { ' ' };
        let text = format!("{marker}{}", truncate(&entry.name, NAME_GLYPHS));
        sprite.draw_text(
            Point::new(0, row as i32 * TextSize::Medium.line_height()),
            &text,
            TextStyle::new(TextSize::Medium, color),
        );
    }

    sprite.push_sprite(surface, 10, 10);
}

/// Listing trimmed at its sentinel, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    entries: Vec<FileEntry>,
    count: NonZeroUsize,
}

impl FileList {
    pub fn new(mut entries: Vec<FileEntry>) -> Result<Self> {
        let size = array_size(&entries);
        let count = NonZeroUsize::new(size).ok_or(MenuError::EmptyMenu)?;
        entries.truncate(size);
        Ok(Self { entries, count })
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn count(&self) -> NonZeroUsize {
        self.count
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }
}

/// Listing driven by the selection loop; choosing a row only reports it
pub struct FileView<'f> {
    files: &'f FileList,
    palette: Palette,
}

impl<'f> FileView<'f> {
    pub fn new(files: &'f FileList, palette: Palette) -> Self {
        Self { files, palette }
    }
}

impl View for FileView<'_> {
    fn count(&self) -> NonZeroUsize {
        self.files.count()
    }

    fn draw<S: Surface>(&self, surface: &mut S, state: &NavigationState) {
        list_files(surface, self.files.entries(), state.selected(), &self.palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn listing(rows: &[[&str; 3]]) -> Vec<FileEntry> {
        rows.iter().map(|row| FileEntry::from_columns(*row)).collect()
    }

    #[test]
    fn size_stops_at_sentinel() {
        let entries = listing(&[["a", "", "plain"], ["b", "", "folder"], ["", "", ""]]);
        assert_eq!(array_size(&entries), 2);
    }

    #[test]
    fn size_ignores_rows_after_sentinel() {
        let entries = listing(&[["a", "", "file"], ["", "", ""], ["c", "", "file"]]);
        assert_eq!(array_size(&entries), 1);
    }

    #[test]
    fn size_is_capped() {
        let entries = vec![FileEntry::new("x", "", FileKind::Plain); MAX_FILES + 10];
        assert_eq!(array_size(&entries), MAX_FILES);
    }

    #[test]
    fn selected_folder_row_is_marked_and_tinted() {
        let entries = listing(&[["a", "", "plain"], ["b", "", "folder"], ["", "", ""]]);
        let palette = Palette::default();
        let mut surface = RecordingSurface::new(240, 135);
        list_files(&mut surface, &entries, 1, &palette);

        let rows: Vec<(String, Color)> = surface
            .texts()
            .map(|(_, text, style)| (text.to_string(), style.fg))
            .collect();
        assert_eq!(
            rows,
            vec![
                (" a".to_string(), palette.foreground),
                (">b".to_string(), palette.foreground.dimmed(FOLDER_TINT)),
            ]
        );
    }

    #[test]
    fn operator_rows_use_alert_color() {
        let entries = listing(&[["> Back", "", "operator"], ["", "", ""]]);
        let palette = Palette::default();
        let mut surface = RecordingSurface::new(240, 135);
        list_files(&mut surface, &entries, 0, &palette);

        let (_, _, style) = surface.texts().next().unwrap();
        assert_eq!(style.fg, palette.alert);
    }

    #[test]
    fn long_listing_scrolls_like_menus() {
        let rows: Vec<FileEntry> = (0..12)
            .map(|i| FileEntry::new(format!("file{i:02}.sub"), "", FileKind::Plain))
            .collect();
        let mut surface = RecordingSurface::new(240, 135);
        list_files(&mut surface, &rows, 9, &Palette::default());

        let names: Vec<String> = surface.texts().map(|(_, text, _)| text.to_string()).collect();
        assert_eq!(names.len(), VISIBLE_FILES);
        assert_eq!(names.first().map(String::as_str), Some(" file03.sub"));
        assert_eq!(names.last().map(String::as_str), Some(">file09.sub"));
    }

    #[test]
    fn names_are_truncated() {
        let entries = vec![FileEntry::new("a_really_long_capture_name.ir", "", FileKind::Plain)];
        let mut surface = RecordingSurface::new(240, 135);
        list_files(&mut surface, &entries, 0, &Palette::default());

        let (_, text, _) = surface.texts().next().unwrap();
        assert_eq!(text, ">a_really_long_ca");
    }

    #[test]
    fn file_list_rejects_listing_that_starts_with_sentinel() {
        let err = FileList::new(vec![FileEntry::sentinel()]).unwrap_err();
        assert!(matches!(err, MenuError::EmptyMenu));
    }

    #[test]
    fn file_list_trims_at_sentinel() {
        let files = FileList::new(listing(&[["a", "/a", "file"], ["", "", ""], ["z", "", "file"]]))
            .unwrap();
        assert_eq!(files.count().get(), 1);
        assert_eq!(files.get(0).map(|entry| entry.reserved.as_str()), Some("/a"));
    }

    #[test]
    fn kind_tags_parse() {
        assert_eq!(FileKind::from_tag("folder"), Some(FileKind::Folder));
        assert_eq!(FileKind::from_tag("operator"), Some(FileKind::Operator));
        assert_eq!(FileKind::from_tag("file"), Some(FileKind::Plain));
        assert_eq!(FileKind::from_tag(""), None);
    }
}
