use gloo_file::File as GlooFile;
use shared::ImageKind;

/// Anything the uploader can receive: a browser `File` at runtime.
pub trait ImageFile {
    fn media_type(&self) -> String;
    fn name(&self) -> String;
}

impl ImageFile for GlooFile {
    fn media_type(&self) -> String {
        self.raw_mime_type()
    }

    fn name(&self) -> String {
        GlooFile::name(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Chosen,
    Dropped,
}

impl ImageSource {
    pub fn rejection_message(self) -> &'static str {
        match self {
            ImageSource::Chosen => "Please choose an image file (JPG, PNG, GIF)",
            ImageSource::Dropped => "Please drag an image file (JPG, PNG, GIF)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no file supplied")]
    Missing { origin: ImageSource },
    #[error("unsupported media type {media_type:?} for {name}")]
    Unsupported {
        origin: ImageSource,
        name: String,
        media_type: String,
    },
}

impl Rejection {
    pub fn origin(&self) -> ImageSource {
        match self {
            Rejection::Missing { origin } | Rejection::Unsupported { origin, .. } => *origin,
        }
    }

    pub fn alert_message(&self) -> &'static str {
        self.origin().rejection_message()
    }
}

pub fn validate<F: ImageFile>(candidate: Option<&F>, origin: ImageSource) -> Result<ImageKind, Rejection> {
    let file = candidate.ok_or(Rejection::Missing { origin })?;
    let media_type = file.media_type();

    ImageKind::from_media_type(&media_type).ok_or_else(|| Rejection::Unsupported {
        origin,
        name: file.name(),
        media_type,
    })
}

/// The accepted image together with its preview handle. Dropping it
/// releases the preview.
pub struct SelectedImage<F, P> {
    pub file: F,
    pub kind: ImageKind,
    pub preview: P,
}

/// Nesting counter for drag events over the drop zone. Children of the
/// zone fire their own enter/leave pairs, so a plain flag would flicker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    depth: u32,
}

impl DragTracker {
    pub fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }

    #[cfg(test)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_dragging(&self) -> bool {
        self.depth != 0
    }
}

/// Owns the current selection and the drop-zone state. `P` is the preview
/// resource; it is created on acceptance and dropped when superseded.
pub struct InputAcquirer<F, P> {
    current: Option<SelectedImage<F, P>>,
    drag: DragTracker,
}

impl<F, P> Default for InputAcquirer<F, P> {
    fn default() -> Self {
        Self {
            current: None,
            drag: DragTracker::default(),
        }
    }
}

impl<F: ImageFile, P> InputAcquirer<F, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SelectedImage<F, P>> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_enter(&mut self) {
        self.drag.enter();
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Validates `candidate` and, on success, replaces the held image.
    /// A rejection leaves the selection untouched.
    pub fn offer(
        &mut self,
        candidate: Option<F>,
        origin: ImageSource,
        make_preview: impl FnOnce(&F) -> P,
    ) -> Result<&SelectedImage<F, P>, Rejection> {
        let kind = validate(candidate.as_ref(), origin)?;
        let Some(file) = candidate else {
            return Err(Rejection::Missing { origin });
        };

        log::info!("Accepted {} ({}) via {:?}", file.name(), kind.media_type(), origin);
        let preview = make_preview(&file);

        // The previous selection, preview included, is dropped here.
        let selected = self.current.insert(SelectedImage { file, kind, preview });
        Ok(&*selected)
    }

    /// Ends a drag regardless of how many enter/leave events were seen,
    /// then offers the first dropped file.
    pub fn drop_file(
        &mut self,
        candidate: Option<F>,
        make_preview: impl FnOnce(&F) -> P,
    ) -> Result<&SelectedImage<F, P>, Rejection> {
        self.drag.reset();
        self.offer(candidate, ImageSource::Dropped, make_preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        name: &'static str,
        media_type: &'static str,
    }

    impl ImageFile for FakeFile {
        fn media_type(&self) -> String {
            self.media_type.to_string()
        }

        fn name(&self) -> String {
            self.name.to_string()
        }
    }

    struct FakePreview {
        released: Rc<Cell<u32>>,
    }

    impl Drop for FakePreview {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn file(name: &'static str, media_type: &'static str) -> FakeFile {
        FakeFile { name, media_type }
    }

    fn preview(released: &Rc<Cell<u32>>) -> Box<dyn FnOnce(&FakeFile) -> FakePreview> {
        let released = Rc::clone(released);
        Box::new(move |_| FakePreview { released })
    }

    #[test]
    fn test_accepts_jpeg_png_gif() {
        let released = Rc::new(Cell::new(0));
        let mut acquirer = InputAcquirer::new();

        for (name, media_type, kind) in [
            ("cat.jpg", "image/jpeg", ImageKind::Jpeg),
            ("dog.png", "image/png", ImageKind::Png),
            ("bird.gif", "image/gif", ImageKind::Gif),
        ] {
            let selected = acquirer
                .offer(Some(file(name, media_type)), ImageSource::Chosen, preview(&released))
                .unwrap();
            assert_eq!(selected.kind, kind);
            assert_eq!(selected.file.name, name);
        }
    }

    #[test]
    fn test_rejection_leaves_selection_unchanged() {
        let released = Rc::new(Cell::new(0));
        let mut acquirer = InputAcquirer::new();
        acquirer
            .offer(Some(file("cat.jpg", "image/jpeg")), ImageSource::Chosen, preview(&released))
            .unwrap();

        for media_type in ["image/webp", "image/bmp", "application/pdf", "text/plain", ""] {
            for origin in [ImageSource::Chosen, ImageSource::Dropped] {
                let err = acquirer
                    .offer(Some(file("other", media_type)), origin, preview(&released))
                    .err()
                    .unwrap();
                assert_eq!(err.origin(), origin);
            }
        }

        assert_eq!(acquirer.current().unwrap().file.name, "cat.jpg");
        assert_eq!(released.get(), 0);
    }

    #[test]
    fn test_rejection_messages_differ_by_source() {
        let chosen = validate(Some(&file("a.txt", "text/plain")), ImageSource::Chosen).unwrap_err();
        let dropped = validate(None::<&FakeFile>, ImageSource::Dropped).unwrap_err();

        assert_eq!(chosen.alert_message(), "Please choose an image file (JPG, PNG, GIF)");
        assert_eq!(dropped.alert_message(), "Please drag an image file (JPG, PNG, GIF)");
        assert_eq!(dropped, Rejection::Missing { origin: ImageSource::Dropped });
    }

    #[test]
    fn test_replacing_releases_previous_preview_once() {
        let released = Rc::new(Cell::new(0));
        let mut acquirer = InputAcquirer::new();

        acquirer
            .offer(Some(file("one.png", "image/png")), ImageSource::Chosen, preview(&released))
            .unwrap();
        assert_eq!(released.get(), 0);

        acquirer
            .offer(Some(file("two.png", "image/png")), ImageSource::Chosen, preview(&released))
            .unwrap();
        assert_eq!(released.get(), 1);

        // Same file again still goes through the replace path.
        acquirer
            .offer(Some(file("two.png", "image/png")), ImageSource::Chosen, preview(&released))
            .unwrap();
        assert_eq!(released.get(), 2);

        drop(acquirer);
        assert_eq!(released.get(), 3);
    }

    #[test]
    fn test_drag_counter_tracks_nesting() {
        let mut drag = DragTracker::default();
        assert!(!drag.is_dragging());

        drag.enter();
        drag.enter(); // child element
        drag.leave(); // left the child, still over the zone
        assert!(drag.is_dragging());
        assert_eq!(drag.depth(), 1);

        drag.leave();
        assert!(!drag.is_dragging());

        drag.leave(); // stray leave does not underflow
        assert_eq!(drag.depth(), 0);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_always_resets_dragging() {
        let released = Rc::new(Cell::new(0));
        let mut acquirer: InputAcquirer<FakeFile, FakePreview> = InputAcquirer::new();

        acquirer.drag_enter();
        acquirer.drag_enter();
        acquirer.drag_enter();
        acquirer.drag_leave();
        assert!(acquirer.is_dragging());

        // Rejected drop still ends the drag.
        assert!(acquirer.drop_file(Some(file("notes.txt", "text/plain")), preview(&released)).is_err());
        assert!(!acquirer.is_dragging());
        assert!(!acquirer.has_image());

        acquirer.drag_enter();
        let selected = acquirer
            .drop_file(Some(file("cat.jpg", "image/jpeg")), preview(&released))
            .unwrap();
        assert_eq!(selected.kind, ImageKind::Jpeg);
        assert!(!acquirer.is_dragging());
    }

    #[test]
    fn test_drop_without_file_is_rejected() {
        let released = Rc::new(Cell::new(0));
        let mut acquirer: InputAcquirer<FakeFile, FakePreview> = InputAcquirer::new();
        acquirer.drag_enter();

        let err = acquirer.drop_file(None, preview(&released)).err().unwrap();
        assert_eq!(err, Rejection::Missing { origin: ImageSource::Dropped });
        assert!(!acquirer.is_dragging());
    }
}
