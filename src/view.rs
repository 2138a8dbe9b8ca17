use core::fmt;
use uuid::Uuid;

/// A unique identifier for a view.
///
/// (this is just a UUID)
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32, u16, u16, [u8; 8]);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ViewId(a, b, c, *d)
    }

    fn as_uuid(&self) -> Uuid {
        Uuid::from_fields(self.0, self.1, self.2, &self.3)
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ViewId({})", self.as_uuid().simple())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uuid().simple())
    }
}

/// Types of native views the host is asked to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// A plain leaf view with no layout of its own.
    View,
    /// A view that lays out its subviews.
    Container,
    /// A scroll view; its subviews live in a separate document view.
    Scrolling,
    /// The oversized content view of a scroll view.
    Document,
}
