use std::io::Cursor;

use symphonia::core::codecs::CODEC_TYPE_PCM_S16LE;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::TranscriptionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub bits_per_sample: Option<u32>,
    pub is_pcm_s16le: bool,
}

/// Reads the container header of `data`.
///
/// Returns `None` when no known container is detected, e.g. for headerless PCM.
pub fn probe_audio_format(data: &[u8]) -> Option<AudioFormat> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .ok()?;

    let track = probed.format.default_track()?;
    let params = &track.codec_params;

    Some(AudioFormat {
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count()),
        bits_per_sample: params.bits_per_sample,
        is_pcm_s16le: params.codec == CODEC_TYPE_PCM_S16LE,
    })
}

/// Rejects audio whose header declares anything other than mono 16-bit linear PCM
/// at `sample_rate_hertz`. No transcoding is attempted.
pub fn ensure_linear16_mono(data: &[u8], sample_rate_hertz: u32) -> Result<(), TranscriptionError> {
    let Some(format) = probe_audio_format(data) else {
        return Ok(());
    };

    if !format.is_pcm_s16le {
        return Err(TranscriptionError::UnsupportedFormat(
            "expected 16-bit linear PCM".to_string(),
        ));
    }

    if format.sample_rate != Some(sample_rate_hertz) {
        return Err(TranscriptionError::UnsupportedFormat(format!(
            "expected {} Hz, got {:?}",
            sample_rate_hertz, format.sample_rate
        )));
    }

    if format.channels != Some(1) {
        return Err(TranscriptionError::UnsupportedFormat(format!(
            "expected mono audio, got {:?} channels",
            format.channels
        )));
    }

    Ok(())
}
