//! Wavefront OBJ output.
//!
//! Vertices are written as `v x y z` with five significant digits (C `%.5g`
//! style), followed by a blank line and `f a b c` faces with 1-based indices.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ctsurf::Mesh;

/// Significant digits per vertex coordinate.
pub const OBJ_SIGNIFICANT_DIGITS: usize = 5;

/// Format `value` like C's `%.{digits}g`.
pub fn format_significant(value: f32, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value < 0.0 {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }

    // The exponent is taken after rounding to `digits`, so 99999.5 becomes 1e+05.
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// OBJ writer with optional progress reporting.
#[derive(Debug, Clone, Copy)]
pub struct ObjWriter {
    progress_period: usize,
}

impl Default for ObjWriter {
    fn default() -> Self {
        Self {
            progress_period: 1000,
        }
    }
}

impl ObjWriter {
    /// Writer reporting progress every 1000 entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress every `period` entries (vertices plus faces).
    pub fn with_progress_period(mut self, period: usize) -> Self {
        self.progress_period = period.max(1);
        self
    }

    /// Write `mesh` to `writer`.
    ///
    /// `on_progress` receives the written fraction of all entries, ending with
    /// `1.0`.
    pub fn write<W, F>(&self, mesh: &Mesh, mut writer: W, mut on_progress: F) -> io::Result<()>
    where
        W: Write,
        F: FnMut(f32),
    {
        let entries = (mesh.vertex_count() + mesh.triangle_count()).max(1) as f32;

        for (n, v) in mesh.vertices().iter().enumerate() {
            writeln!(
                writer,
                "v {} {} {}",
                format_significant(v.x, OBJ_SIGNIFICANT_DIGITS),
                format_significant(v.y, OBJ_SIGNIFICANT_DIGITS),
                format_significant(v.z, OBJ_SIGNIFICANT_DIGITS)
            )?;
            if n % self.progress_period == 0 {
                on_progress(n as f32 / entries);
            }
        }

        writeln!(writer)?;

        let offset = mesh.vertex_count();
        for (n, t) in mesh.triangles().iter().enumerate() {
            writeln!(writer, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
            if n % self.progress_period == 0 {
                on_progress((offset + n) as f32 / entries);
            }
        }

        writer.flush()?;
        on_progress(1.0);
        Ok(())
    }

    /// Write `mesh` to a file at `path`.
    pub fn save<P: AsRef<Path>>(&self, mesh: &Mesh, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write(mesh, BufWriter::new(file), |_| {})?;
        log::debug!(
            "Wrote {} vertices and {} faces to {}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            path.display()
        );
        Ok(())
    }
}

/// Write `mesh` to `writer` without progress reporting.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: W) -> io::Result<()> {
    ObjWriter::new().write(mesh, writer, |_| {})
}
