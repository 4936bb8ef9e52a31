//! IR remote add-on.
//!
//! Key codes are the command bytes sent by the Robobit remote.
//! [`IrRemote`] turns received codes into handler calls.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::ir::{IrKey, IrRemote};
//! use rs_robobit::hal::MockIr;
//!
//! let mut remote = IrRemote::new(MockIr::new());
//! let mut ups = 0;
//! remote.on_key(IrKey::Up, move |_| { ups += 1; });
//!
//! remote.receiver_mut().press(IrKey::Up.code());
//! assert_eq!(remote.poll(), Some(IrKey::Up.code()));
//! assert!(remote.key_pressed(IrKey::Up));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::parsing::lookup;
use crate::traits::IrReceiver;

/// Keys on the Robobit IR remote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IrKey {
    /// Matches every key.
    Any = 0,
    /// 1
    One = 162,
    /// 2
    Two = 98,
    /// 3
    Three = 226,
    /// 4
    Four = 34,
    /// 5
    Five = 2,
    /// 6
    Six = 194,
    /// Save
    Save = 224,
    /// Stop (■)
    Stop = 168,
    /// Load
    Load = 144,
    /// Cross (X)
    Cross = 104,
    /// Pause (║)
    Pause = 152,
    /// Tick (✓)
    Tick = 176,
    /// Up arrow
    Up = 24,
    /// Down arrow
    Down = 74,
    /// Left arrow
    Left = 16,
    /// Right arrow
    Right = 90,
    /// Go
    Go = 56,
}

impl IrKey {
    /// Every key except [`IrKey::Any`].
    pub const KEYS: [IrKey; 17] = [
        IrKey::One,
        IrKey::Two,
        IrKey::Three,
        IrKey::Four,
        IrKey::Five,
        IrKey::Six,
        IrKey::Save,
        IrKey::Stop,
        IrKey::Load,
        IrKey::Cross,
        IrKey::Pause,
        IrKey::Tick,
        IrKey::Up,
        IrKey::Down,
        IrKey::Left,
        IrKey::Right,
        IrKey::Go,
    ];

    /// The command byte.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The key sending `code`. Code 0 is [`IrKey::Any`].
    pub fn from_code(code: u8) -> Option<Self> {
        if code == 0 {
            return Some(IrKey::Any);
        }
        IrKey::KEYS.iter().copied().find(|k| k.code() == code)
    }

    /// Whether a received `code` counts as this key. [`IrKey::Any`]
    /// matches every code.
    #[inline]
    pub fn matches(self, code: u8) -> bool {
        self == IrKey::Any || self.code() == code
    }

    /// Parses a key label such as `"up"`, `"3"` or `"tick"`.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["any"], IrKey::Any),
                (&["1", "one"], IrKey::One),
                (&["2", "two"], IrKey::Two),
                (&["3", "three"], IrKey::Three),
                (&["4", "four"], IrKey::Four),
                (&["5", "five"], IrKey::Five),
                (&["6", "six"], IrKey::Six),
                (&["save"], IrKey::Save),
                (&["stop"], IrKey::Stop),
                (&["load"], IrKey::Load),
                (&["cross", "x"], IrKey::Cross),
                (&["pause"], IrKey::Pause),
                (&["tick", "ok"], IrKey::Tick),
                (&["up"], IrKey::Up),
                (&["down"], IrKey::Down),
                (&["left"], IrKey::Left),
                (&["right"], IrKey::Right),
                (&["go"], IrKey::Go),
            ],
        )
    }
}

impl TryFrom<u8> for IrKey {
    type Error = ConfigError;

    /// Converts a command byte.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        IrKey::from_code(code).ok_or(ConfigError::UnknownVariant {
            kind: "IrKey",
            value: code,
        })
    }
}

type Handler = Box<dyn FnMut(u8) + Send>;

/// Dispatches received IR codes to registered handlers.
pub struct IrRemote<R: IrReceiver> {
    receiver: R,
    handlers: Vec<(IrKey, Handler)>,
}

impl<R: IrReceiver> IrRemote<R> {
    /// Wraps `receiver` with no handlers.
    pub fn new(receiver: R) -> Self {
        Self {
            receiver,
            handlers: Vec::new(),
        }
    }

    /// Borrows the receiver.
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Mutably borrows the receiver.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Last code received, if any.
    pub fn last_code(&self) -> Option<u8> {
        self.receiver.last_code()
    }

    /// Key of the last code received. Codes from other remotes give `None`.
    pub fn last_key(&self) -> Option<IrKey> {
        self.last_code().and_then(IrKey::from_code)
    }

    /// Whether the last code received was `key`.
    pub fn key_pressed(&self, key: IrKey) -> bool {
        self.last_code().is_some_and(|code| key.matches(code))
    }

    /// Registers `handler` for `key`. Handlers get the received code.
    pub fn on_key<F>(&mut self, key: IrKey, handler: F)
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.handlers.push((key, Box::new(handler)));
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Takes every code received since the last poll and runs the matching
    /// handlers in registration order. Returns the newest code.
    pub fn poll(&mut self) -> Option<u8> {
        let mut newest = None;
        while let Some(code) = self.receiver.next_code() {
            debug!("ir code {}", code);
            for (key, handler) in self.handlers.iter_mut() {
                if key.matches(code) {
                    handler(code);
                }
            }
            newest = Some(code);
        }
        newest
    }
}

impl<R: IrReceiver + core::fmt::Debug> core::fmt::Debug for IrRemote<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IrRemote")
            .field("receiver", &self.receiver)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
