//! Geometry primitives for viewport intersection
//!
//! All units are CSS pixels with the origin at the top-left corner:
//! positive X extends right, positive Y extends down, matching the
//! coordinate system page hosts report element bounds in.
//!
//! The only consumer with real geometric needs is the viewport observer,
//! so the surface here is small: rectangles, their intersection, and the
//! visible-fraction computation that decides whether a reveal target has
//! "entered" the trigger region.

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use uplift::Point;
///
/// let p = Point::new(12.0, 300.0);
/// assert_eq!(p.x, 12.0);
/// assert_eq!(p.y, 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

/// A 2D size in CSS pixels
///
/// # Examples
///
/// ```
/// use uplift::Size;
///
/// let viewport = Size::new(1280.0, 720.0);
/// assert_eq!(viewport.area(), 921_600.0);
/// assert!(!viewport.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Computes the area (width × height)
  pub fn area(self) -> f32 {
    self.width * self.height
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

/// An axis-aligned rectangle in CSS pixel space
///
/// Defined by an origin point (top-left corner) and a size. Used both for
/// the viewport (and its contracted trigger region) and for element bounds
/// reported by the page host.
///
/// # Examples
///
/// ```
/// use uplift::Rect;
///
/// let viewport = Rect::from_xywh(0.0, 0.0, 1280.0, 720.0);
/// let card = Rect::from_xywh(100.0, 650.0, 400.0, 200.0);
///
/// // The card pokes 70px into the viewport.
/// let fraction = card.fraction_inside(viewport);
/// assert!((fraction - 70.0 / 200.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner of the rectangle
  pub origin: Point,
  /// The size (width and height) of the rectangle
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the top edge
  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns the area of the rectangle
  pub fn area(self) -> f32 {
    self.size.area()
  }

  /// Returns true if this rectangle overlaps another
  ///
  /// Rectangles that merely touch at an edge or corner have zero shared
  /// area and do not count as overlapping here.
  pub fn overlaps(self, other: Rect) -> bool {
    self.min_x() < other.max_x()
      && self.max_x() > other.min_x()
      && self.min_y() < other.max_y()
      && self.max_y() > other.min_y()
  }

  /// Computes the intersection of two rectangles
  ///
  /// Returns `None` when the rectangles share no area.
  ///
  /// # Examples
  ///
  /// ```
  /// use uplift::Rect;
  ///
  /// let a = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
  /// let b = Rect::from_xywh(60.0, 40.0, 100.0, 100.0);
  /// assert_eq!(a.intersection(b), Some(Rect::from_xywh(60.0, 40.0, 40.0, 60.0)));
  ///
  /// let far = Rect::from_xywh(500.0, 500.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(far), None);
  /// ```
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    if !self.overlaps(other) {
      return None;
    }

    let min_x = self.min_x().max(other.min_x());
    let min_y = self.min_y().max(other.min_y());
    let max_x = self.max_x().min(other.max_x());
    let max_y = self.max_y().min(other.max_y());

    Some(Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y))
  }

  /// Fraction of this rectangle's area that lies inside `region`
  ///
  /// Returns a value in `[0.0, 1.0]`. A rectangle with no area is defined
  /// to have fraction 0.0 — it stays unrevealed until it gains layout size.
  pub fn fraction_inside(self, region: Rect) -> f32 {
    let own_area = self.area();
    if own_area <= 0.0 {
      return 0.0;
    }

    match self.intersection(region) {
      Some(overlap) => (overlap.area() / own_area).clamp(0.0, 1.0),
      None => 0.0,
    }
  }

  /// Returns this rectangle with its bottom edge raised by `offset` pixels
  ///
  /// This is how the viewport becomes the reveal trigger region: the
  /// trigger line sits `offset` px above the true bottom edge. The height
  /// never goes negative; an offset taller than the rectangle collapses it
  /// to zero height.
  ///
  /// # Examples
  ///
  /// ```
  /// use uplift::Rect;
  ///
  /// let viewport = Rect::from_xywh(0.0, 0.0, 1280.0, 720.0);
  /// let trigger = viewport.shrink_bottom(48.0);
  /// assert_eq!(trigger.max_y(), 672.0);
  /// assert_eq!(trigger.min_y(), 0.0);
  /// ```
  pub fn shrink_bottom(self, offset: f32) -> Rect {
    let height = (self.size.height - offset.max(0.0)).max(0.0);
    Rect {
      origin: self.origin,
      size: Size::new(self.size.width, height),
    }
  }
}
