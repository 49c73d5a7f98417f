// Is this re-export necessary?
pub use std::prelude::v1::*;

pub use std::cell::{Cell, Ref, RefCell, RefMut};
pub use std::cmp;
pub use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
pub use std::convert::{TryFrom, TryInto};
pub use std::fmt;
pub use std::hash::{Hash, Hasher};
pub use std::iter::{self, FromIterator};
pub use std::marker::PhantomData;
pub use std::mem;
pub use std::ops::{Deref, DerefMut, Range, RangeInclusive};
pub use std::panic::Location;
pub use std::rc::{Rc, Weak as RcWeak};
pub use std::sync::atomic::{AtomicU32, AtomicU64, Ordering as AtomicOrdering};
pub use std::{f32, f64, str};

#[cfg(feature = "anyhow")]
pub use ::anyhow::{
  self, bail, ensure, format_err, Context as ResultContextExt, Error as AnyError,
  Result as AnyResult,
};
#[cfg(feature = "bitflags")]
pub use ::bitflags::bitflags;
#[cfg(feature = "log")]
pub use ::log::{self, debug, error, info, log, log_enabled, trace, warn, Level as LogLevel};
