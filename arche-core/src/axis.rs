//! Axis identifiers and axis subsets

/// Physical machine axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal axis, also the representative resolution for pulse timing
    X = 0,
    /// Horizontal axis
    Y = 1,
    /// Vertical axis, homed first to clear the work area
    Z = 2,
    /// Auxiliary fourth axis
    C = 3,
}

impl Axis {
    /// Number of machine axes
    pub const COUNT: usize = 4;

    /// All axes in index order
    pub const ALL: [Axis; Axis::COUNT] = [Axis::X, Axis::Y, Axis::Z, Axis::C];

    /// Zero-based axis index
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A subset of the machine axes, one logical bit per axis.
///
/// During a homing pass this holds the axes that are still moving; the
/// pulse generator only ever removes members as axes individually reach
/// their stop condition. The set never grows mid-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSet(u8);

impl AxisSet {
    /// The empty set
    pub const EMPTY: AxisSet = AxisSet(0);

    /// A set holding a single axis
    pub const fn single(axis: Axis) -> Self {
        AxisSet(1 << axis.index())
    }

    /// Build a set from a slice of axes
    pub fn from_axes(axes: &[Axis]) -> Self {
        let mut set = AxisSet::EMPTY;
        for &axis in axes {
            set.insert(axis);
        }
        set
    }

    /// Check membership
    pub const fn contains(self, axis: Axis) -> bool {
        self.0 & (1 << axis.index()) != 0
    }

    /// Add an axis to the set
    pub fn insert(&mut self, axis: Axis) {
        self.0 |= 1 << axis.index();
    }

    /// Remove an axis from the set
    pub fn remove(&mut self, axis: Axis) {
        self.0 &= !(1 << axis.index());
    }

    /// Check if the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of axes in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// This set with one more axis
    pub const fn with(self, axis: Axis) -> Self {
        AxisSet(self.0 | 1 << axis.index())
    }

    /// This set with one axis removed
    pub const fn without(self, axis: Axis) -> Self {
        AxisSet(self.0 & !(1 << axis.index()))
    }

    /// Axes present in both sets
    pub const fn intersection(self, other: AxisSet) -> Self {
        AxisSet(self.0 & other.0)
    }

    /// Iterate the member axes in index order
    pub fn iter(self) -> AxisIter {
        AxisIter { set: self, next: 0 }
    }
}

/// Iterator over the axes in an [`AxisSet`]
pub struct AxisIter {
    set: AxisSet,
    next: usize,
}

impl Iterator for AxisIter {
    type Item = Axis;

    fn next(&mut self) -> Option<Axis> {
        while self.next < Axis::COUNT {
            let axis = Axis::ALL[self.next];
            self.next += 1;
            if self.set.contains(axis) {
                return Some(axis);
            }
        }
        None
    }
}

impl IntoIterator for AxisSet {
    type Item = Axis;
    type IntoIter = AxisIter;

    fn into_iter(self) -> AxisIter {
        self.iter()
    }
}
