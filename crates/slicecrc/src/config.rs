//! Engine configuration (convention + behavior knobs).
//!
//! Defaults follow CRC-32/ISO-HDLC and never depend on the process
//! environment. [`EngineConfig::from_env`] is the explicit opt-in that applies
//! two overrides when the `std` feature is enabled:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `SLICECRC_PARTIAL` | `narrowed` (default), `serial` |
//! | `SLICECRC_OUTPUT` | `combinational` (default), `registered` |
//!
//! The environment is read once per process. Unrecognized values are ignored.

/// How a group with fewer valid bytes than the engine width is folded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PartialStrategy {
  /// The combined formula instantiated at the group's own width, using `T[0..k-1]`.
  #[default]
  Narrowed,
  /// `k` single-byte updates through `T[0]`.
  Serial,
}

impl PartialStrategy {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Narrowed => "narrowed",
      Self::Serial => "serial",
    }
  }

  /// Parse a configuration value, case-insensitively.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("narrowed") || value.eq_ignore_ascii_case("narrow") {
      return Some(Self::Narrowed);
    }
    if value.eq_ignore_ascii_case("serial") || value.eq_ignore_ascii_case("bytewise") {
      return Some(Self::Serial);
    }
    None
  }
}

/// When a result becomes observable.
///
/// This only shifts *when* `result()` reflects a group, never the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
  /// `result()` reflects a group as soon as it is accepted.
  #[default]
  Combinational,
  /// `result()` reads an output latch that trails the register by one step.
  Registered,
}

impl OutputMode {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Combinational => "combinational",
      Self::Registered => "registered",
    }
  }

  /// Parse a configuration value, case-insensitively.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("combinational") || value.eq_ignore_ascii_case("comb") {
      return Some(Self::Combinational);
    }
    if value.eq_ignore_ascii_case("registered") || value.eq_ignore_ascii_case("reg") {
      return Some(Self::Registered);
    }
    None
  }
}

/// Full engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineConfig {
  /// Register value after reset.
  pub init: u32,
  /// XORed into the register by `result()`.
  pub xor_out: u32,
  pub output: OutputMode,
  pub partial: PartialStrategy,
}

impl EngineConfig {
  /// CRC-32/ISO-HDLC convention, combinational output, narrowed partial groups.
  pub const CRC32: Self = Self {
    init: 0xFFFF_FFFF,
    xor_out: 0xFFFF_FFFF,
    output: OutputMode::Combinational,
    partial: PartialStrategy::Narrowed,
  };

  #[inline]
  #[must_use]
  pub const fn with_output(mut self, output: OutputMode) -> Self {
    self.output = output;
    self
  }

  #[inline]
  #[must_use]
  pub const fn with_partial(mut self, partial: PartialStrategy) -> Self {
    self.partial = partial;
    self
  }

  /// [`EngineConfig::CRC32`] with any environment overrides applied.
  ///
  /// `SLICECRC_OUTPUT=registered` delays `result()` by one step, so only
  /// callers that drive the engine step by step should opt in.
  #[must_use]
  pub fn from_env() -> Self {
    overrides().apply(Self::CRC32)
  }
}

impl Default for EngineConfig {
  /// [`EngineConfig::CRC32`], whatever the environment says.
  #[inline]
  fn default() -> Self {
    Self::CRC32
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  output: Option<OutputMode>,
  partial: Option<PartialStrategy>,
}

impl Overrides {
  /// Read overrides through `var`, skipping blank and unrecognized values.
  #[cfg_attr(not(feature = "std"), allow(dead_code))]
  fn read<V, F>(var: F) -> Self
  where
    V: AsRef<str>,
    F: Fn(&str) -> Option<V>,
  {
    let lookup = |name: &str| var(name).filter(|v| !v.as_ref().trim().is_empty());
    Self {
      output: lookup("SLICECRC_OUTPUT").and_then(|v| OutputMode::parse(v.as_ref())),
      partial: lookup("SLICECRC_PARTIAL").and_then(|v| PartialStrategy::parse(v.as_ref())),
    }
  }

  fn apply(self, mut config: EngineConfig) -> EngineConfig {
    if let Some(output) = self.output {
      config.output = output;
    }
    if let Some(partial) = self.partial {
      config.partial = partial;
    }
    config
  }
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  Overrides::read(|name| std::env::var(name).ok())
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}
