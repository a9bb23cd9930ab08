use delve_core::{Point, Range};

/// Cost reported for cells the last search never reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// Search record for one cell. Only meaningful while `stamp` equals the
/// owning [`PathRange`]'s current stamp.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    pub(crate) stamp: u32,
    /// Best known cost from the start.
    pub(crate) cost: i32,
    /// `cost` plus the remaining estimate; the heap key.
    pub(crate) rank: i32,
    pub(crate) came_from: Option<usize>,
    pub(crate) closed: bool,
}

impl Slot {
    pub(crate) const BLANK: Slot = Slot {
        stamp: 0,
        cost: UNREACHABLE,
        rank: UNREACHABLE,
        came_from: None,
        closed: false,
    };
}

/// Search state for one grid rectangle.
///
/// The slot array is sized once and reused: each search bumps a stamp
/// instead of clearing it, so repeated queries do not allocate.
pub struct PathRange {
    pub(crate) area: Range,
    pub(crate) stride: usize,
    pub(crate) slots: Vec<Slot>,
    pub(crate) stamp: u32,
    pub(crate) scratch: Vec<Point>,
}

impl PathRange {
    pub fn new(area: Range) -> Self {
        Self {
            area,
            stride: area.width().max(0) as usize,
            slots: vec![Slot::BLANK; area.len()],
            stamp: 0,
            scratch: Vec::with_capacity(8),
        }
    }

    /// Switch to another rectangle. The slot array only ever grows.
    pub fn set_range(&mut self, area: Range) {
        if area.len() > self.slots.len() {
            self.slots.resize(area.len(), Slot::BLANK);
        }
        self.area = area;
        self.stride = area.width().max(0) as usize;
        self.begin_search();
    }

    pub fn range(&self) -> Range {
        self.area
    }

    /// Start a new search generation, invalidating every slot.
    pub(crate) fn begin_search(&mut self) -> u32 {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.slots.fill(Slot::BLANK);
            self.stamp = 1;
        }
        self.stamp
    }

    /// Slot index of `p`, row-major within the rectangle.
    pub(crate) fn index_of(&self, p: Point) -> Option<usize> {
        self.area.contains(p).then(|| {
            let rel = p - self.area.min;
            rel.y as usize * self.stride + rel.x as usize
        })
    }

    pub(crate) fn point_at(&self, i: usize) -> Point {
        let col = (i % self.stride) as i32;
        let row = (i / self.stride) as i32;
        self.area.min.shift(col, row)
    }

    /// Slot `i` as of the current search, or blank if it is stale.
    pub(crate) fn slot(&self, i: usize) -> Slot {
        let s = self.slots[i];
        if s.stamp == self.stamp { s } else { Slot::BLANK }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.area, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Range as serde::Deserialize>::deserialize(deserializer).map(PathRange::new)
    }
}
