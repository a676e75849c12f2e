use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::Compression;
use flate2::write::GzEncoder;

use sncfrag_core::models::{PredictedFragment, ReadInterval, Region};

use crate::error::{ExportError, Result};
use crate::reference::ReferenceSequences;

/// Text formats reads can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    Bed,
    Sam,
}

impl FromStr for ReadFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(ReadFormat::Bed),
            "sam" => Ok(ReadFormat::Sam),
            other => Err(ExportError::UnknownFormat(other.to_string(), "bed, sam")),
        }
    }
}

/// Text formats predicted fragments can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentFormat {
    Bed,
    Table,
}

impl FromStr for FragmentFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(FragmentFormat::Bed),
            "table" | "tsv" => Ok(FragmentFormat::Table),
            other => Err(ExportError::UnknownFormat(other.to_string(), "bed, table")),
        }
    }
}

///
/// Destination of an exporter. Plain files and stdout are buffered, `.gz` paths are
/// compressed.
///
/// Call [OutputWriter::finish] once everything is written: it flushes the buffers and writes
/// the gzip trailer, reporting the errors a drop would swallow.
///
pub enum OutputWriter {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputWriter {
    pub fn finish(self) -> Result<()> {
        match self {
            OutputWriter::Stdout(mut out) => out.flush()?,
            OutputWriter::File(mut out) => out.flush()?,
            OutputWriter::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(out) => out.write(buf),
            OutputWriter::File(out) => out.write(buf),
            OutputWriter::Gzip(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(out) => out.flush(),
            OutputWriter::File(out) => out.flush(),
            OutputWriter::Gzip(out) => out.flush(),
        }
    }
}

///
/// Open an output stream: stdout for `None` or `-`, a gzip stream for paths ending in `.gz`,
/// otherwise a plain buffered file. Parent directories are created as needed.
///
pub fn open_output(path: Option<&Path>) -> Result<OutputWriter> {
    let path = match path {
        None => return Ok(OutputWriter::Stdout(BufWriter::new(io::stdout()))),
        Some(p) if p.as_os_str() == "-" => return Ok(OutputWriter::Stdout(BufWriter::new(io::stdout()))),
        Some(p) => p,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|_| ExportError::ParentDirectoryCreation(parent.display().to_string()))?;
    }

    let file = File::create(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(OutputWriter::Gzip(GzEncoder::new(BufWriter::new(file), Compression::best())))
    } else {
        Ok(OutputWriter::File(BufWriter::new(file)))
    }
}

/// Names unnamed reads `unknown_read_<i>`, counting over the whole output.
#[derive(Debug, Default)]
struct ReadNamer {
    unnamed: usize,
}

impl ReadNamer {
    fn name(&mut self, read: &ReadInterval) -> String {
        match &read.name {
            Some(name) => name.clone(),
            None => {
                let name = format!("unknown_read_{}", self.unnamed);
                self.unnamed += 1;
                name
            }
        }
    }
}

///
/// Collapse identical reads of one region into a single read carrying their summed
/// multiplicity.
///
/// Reads are identical when they share start, stop and sequence. The first read of a stack
/// keeps its name, stacks come out in order of first appearance.
///
pub fn stack_reads(reads: &[ReadInterval]) -> Vec<ReadInterval> {
    let mut positions: HashMap<(u32, u32, Option<&str>), usize> = HashMap::new();
    let mut stacked: Vec<ReadInterval> = Vec::new();

    for read in reads {
        let key = (read.start, read.stop, read.sequence.as_deref());
        match positions.get(&key) {
            Some(&i) => {
                stacked[i].multiplicity = stacked[i].multiplicity.saturating_add(read.multiplicity);
            }
            None => {
                positions.insert(key, stacked.len());
                stacked.push(read.clone());
            }
        }
    }

    stacked
}

///
/// Write reads as BED6: `chr start end name hits .` with half-open coordinates.
///
/// Identical reads are stacked first (see [stack_reads]), `hits` is the size of the stack.
///
pub fn write_reads_bed<'a, W, I>(out: &mut W, regions: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a Region, &'a [ReadInterval])>,
{
    let mut namer = ReadNamer::default();
    for (region, reads) in regions {
        for read in stack_reads(reads) {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t.",
                region.chr,
                read.start,
                read.stop + 1,
                namer.name(&read),
                read.multiplicity
            )?;
        }
    }
    Ok(())
}

///
/// Write reads as SAM text.
///
/// The header has one `@SQ` line per region that has reads. Every read becomes an unspliced,
/// forward strand record with a fixed mapping quality of 60 and `NH:i:1`.
///
pub fn write_reads_sam<'a, W, I>(out: &mut W, regions: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a Region, &'a [ReadInterval])>,
{
    let regions: Vec<(&Region, &[ReadInterval])> = regions.into_iter().collect();

    writeln!(out, "@HD\tVN:1.0\tSO:unsorted")?;
    for (region, reads) in &regions {
        if !reads.is_empty() {
            writeln!(out, "@SQ\tSN:{}\tLN:{}", region.chr, region.width())?;
        }
    }
    writeln!(out, "@PG\tID:0\tPN:sncfrag\tVN:{}", env!("CARGO_PKG_VERSION"))?;

    let mut namer = ReadNamer::default();
    for (region, reads) in &regions {
        for read in reads.iter() {
            writeln!(
                out,
                "{}\t0\t{}\t{}\t60\t{}M\t*\t0\t0\t{}\t*\tNH:i:1",
                namer.name(read),
                region.chr,
                read.start + 1,
                read.width(),
                read.sequence.as_deref().unwrap_or("*")
            )?;
        }
    }
    Ok(())
}

fn fragment_label(region: &Region) -> &str {
    region.name.as_deref().unwrap_or(&region.chr)
}

///
/// Write fragments as BED6: `chr start end <region>_<k> coverage .`, `k` counting from 1
/// within each region.
///
pub fn write_fragments_bed<'a, W, I>(out: &mut W, regions: I) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a Region, &'a [PredictedFragment])>,
{
    for (region, fragments) in regions {
        for (k, fragment) in fragments.iter().enumerate() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}_{}\t{}\t.",
                region.chr,
                fragment.start,
                fragment.stop + 1,
                fragment_label(region),
                k + 1,
                fragment.supporting_reads
            )?;
        }
    }
    Ok(())
}

pub const FRAGMENT_TABLE_HEADER: &str =
    "#region\tname\tstart\tstop\tlength\tsupporting_reads_start\tsupporting_reads_stop\tsupporting_reads";

///
/// Write fragments as a tab-delimited table with 0-based inclusive coordinates.
///
/// With a `reference`, a `sequence` column holds the bases of every fragment, `.` when the
/// reference lacks them.
///
pub fn write_fragments_table<'a, W, I>(
    out: &mut W,
    regions: I,
    reference: Option<&ReferenceSequences>,
) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (&'a Region, &'a [PredictedFragment])>,
{
    match reference {
        Some(_) => writeln!(out, "{}\tsequence", FRAGMENT_TABLE_HEADER)?,
        None => writeln!(out, "{}", FRAGMENT_TABLE_HEADER)?,
    }

    for (region, fragments) in regions {
        for (k, fragment) in fragments.iter().enumerate() {
            write!(
                out,
                "{}\t{}_{}\t{}\t{}\t{}\t{}\t{}\t{}",
                region.chr,
                fragment_label(region),
                k + 1,
                fragment.start,
                fragment.stop,
                fragment.width(),
                fragment.supporting_reads_start,
                fragment.supporting_reads_stop,
                fragment.supporting_reads
            )?;
            if let Some(reference) = reference {
                let sequence = reference.subsequence(&region.chr, fragment.start, fragment.stop);
                write!(out, "\t{}", sequence.as_deref().unwrap_or("."))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
