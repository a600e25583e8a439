//! Waveform recording for simulation output.
//!
//! The [`WaveformRecorder`] trait abstracts waveform output. [`VcdRecorder`]
//! writes the IEEE 1364 Value Change Dump (VCD) format with one time unit per
//! simulation cycle, viewable in GTKWave, Surfer, or other waveform viewers.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::error::SimError;

/// Trait for recording simulation waveforms.
pub trait WaveformRecorder {
    /// Opens a new scope (hierarchy level) in the waveform.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Registers a one-bit signal for recording.
    fn register_signal(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the current scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Records the value of `name` during `cycle`.
    ///
    /// Cycles must be recorded in non-decreasing order.
    fn record(&mut self, cycle: usize, name: &str, value: bool) -> Result<(), SimError>;

    /// Finalizes the waveform output (flush, write trailer, etc.).
    fn finalize(&mut self) -> Result<(), SimError>;
}

/// A registered VCD variable.
struct VcdVar {
    id_code: String,
    last: Option<bool>,
}

/// VCD (Value Change Dump) format recorder following IEEE 1364.
///
/// Only value changes are written; a signal recorded with the same value as
/// in the previous cycle produces no output.
pub struct VcdRecorder<W: Write> {
    writer: W,
    vars: HashMap<String, VcdVar>,
    next_id: u32,
    header_written: bool,
    current_cycle: Option<usize>,
}

impl<W: Write> VcdRecorder<W> {
    /// Creates a new VCD recorder writing to the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vars: HashMap::new(),
            next_id: 0,
            header_written: false,
            current_cycle: None,
        }
    }

    /// Consumes the recorder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_header(&mut self) -> Result<(), SimError> {
        if !self.header_written {
            writeln!(self.writer, "$version")?;
            writeln!(self.writer, "  hwsim boolean circuit simulator")?;
            writeln!(self.writer, "$end")?;
            writeln!(self.writer, "$timescale")?;
            writeln!(self.writer, "  1ns")?;
            writeln!(self.writer, "$end")?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Generates a VCD identifier code from a sequential index.
    ///
    /// Uses printable ASCII characters starting from `!` (0x21).
    /// Multi-character codes are generated for indices >= 94.
    fn make_id_code(index: u32) -> String {
        let mut result = String::new();
        let mut idx = index;
        loop {
            let c = (b'!' + (idx % 94) as u8) as char;
            result.push(c);
            idx /= 94;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        result
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.ensure_header()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    fn register_signal(&mut self, name: &str) -> Result<(), SimError> {
        if self.vars.contains_key(name) {
            return Ok(());
        }
        self.ensure_header()?;
        let id_code = Self::make_id_code(self.next_id);
        self.next_id += 1;
        writeln!(self.writer, "$var wire 1 {id_code} {name} $end")?;
        self.vars.insert(name.to_string(), VcdVar { id_code, last: None });
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    fn record(&mut self, cycle: usize, name: &str, value: bool) -> Result<(), SimError> {
        self.ensure_header()?;

        if self.current_cycle != Some(cycle) {
            if self.current_cycle.is_none() {
                writeln!(self.writer, "$enddefinitions $end")?;
                writeln!(self.writer, "$dumpvars")?;
            }
            writeln!(self.writer, "#{cycle}")?;
            self.current_cycle = Some(cycle);
        }

        let var = self.vars.get_mut(name).ok_or_else(|| {
            SimError::WaveformIo(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unregistered VCD signal '{name}'"),
            ))
        })?;
        if var.last != Some(value) {
            var.last = Some(value);
            writeln!(self.writer, "{}{}", u8::from(value), var.id_code)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        if self.current_cycle.is_none() {
            self.ensure_header()?;
            writeln!(self.writer, "$enddefinitions $end")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
