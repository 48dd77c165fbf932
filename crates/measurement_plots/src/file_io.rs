use crate::error::PlotError;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, trace};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Bytes in one raw sample.
const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// Fail with [`PlotError::MissingFile`] unless `file` exists.
pub fn ensure_exists(file: &Path) -> Result<(), PlotError> {
    if file.exists() {
        Ok(())
    } else {
        Err(PlotError::MissingFile(file.to_owned()))
    }
}

/// Write byte slice to specified file.
pub fn write_file_bytes(file: &Path, data: &[u8]) -> Result<(), PlotError> {
    let file_handle = File::create(file)?;
    let mut writer = BufWriter::new(file_handle);
    writer.write_all(data)?;
    writer.flush()?;
    Ok(())
}

/// Read a file of packed little-endian `f32` samples.
pub fn read_raw_f32(file: &Path) -> Result<Vec<f32>, PlotError> {
    ensure_exists(file)?;
    let bytes = fs::read(file)?;
    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(PlotError::PartialSample {
            path: file.to_owned(),
            len: bytes.len(),
        });
    }
    let samples = bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect::<Vec<_>>();
    debug!("Read {} samples from '{}'", samples.len(), file.display());
    Ok(samples)
}

/// Write samples as packed little-endian `f32`.
pub fn write_raw_f32(file: &Path, samples: &[f32]) -> Result<(), PlotError> {
    let bytes = samples
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .collect::<Vec<_>>();
    write_file_bytes(file, &bytes)
}

/// Mono 32-bit float wav at `sample_rate`.
#[must_use]
pub fn float_wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Write data to a mono float wav file.
pub fn write_wav(
    file: &Path,
    samples: impl IntoIterator<Item = f32>,
    sample_rate: u32,
) -> Result<(), PlotError> {
    let mut writer = WavWriter::create(file, float_wav_spec(sample_rate))?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read data from a wav file. Only the first channel is kept.
pub fn read_wav(file: &Path) -> Result<(WavSpec, Vec<f32>), PlotError> {
    ensure_exists(file)?;
    let mut reader = WavReader::open(file)?;
    let spec = reader.spec();
    trace!("Spec: {spec:?}");
    let channels = usize::from(spec.channels).max(1);
    // Select correct format representation.
    let data = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|x| x.map(|x| x as f32 / full_scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok((spec, data))
}
