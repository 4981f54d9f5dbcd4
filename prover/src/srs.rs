use ark_bn254::{G1Affine, G2Affine};
use bitvec_kzg_primitives::{
    errors::KzgError,
    srs::{SrsLayout, SRS},
    traits::ReadPointFromBytes,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

// Points read from the file per message sent to the decoder workers.
const POINTS_PER_CHUNK: usize = 1024;

/// Loads the powers up to `degree` from an SRS file.
///
/// One reader thread streams the point data from disk and fans it out in
/// chunks to one decoder thread per cpu. The decoded points are fanned back
/// in and sorted by their position in the file. The result is the same
/// [SRS] that [SRS::load_with_degree] builds from the file's bytes.
#[instrument(skip_all, fields(path = %path.as_ref().display(), degree = degree))]
pub fn load_srs_file(path: impl AsRef<Path>, degree: usize) -> Result<SRS, KzgError> {
    let path = path.as_ref().to_path_buf();
    let layout = read_layout(&path)?;
    let (g1_points, g2_points) = layout.points_for_degree(degree)?;

    let g1 = parallel_read_points::<G1Affine>(path.clone(), layout.g1_offset(), g1_points)?;
    let g2 = parallel_read_points::<G2Affine>(path, layout.g2_offset(), g2_points)?;

    let srs = SRS::from_parts(g1, g2)?;
    info!(
        max_degree = srs.max_degree(),
        g2_max_degree = srs.g2_max_degree(),
        "loaded srs"
    );
    Ok(srs)
}

fn read_layout(path: &Path) -> Result<SrsLayout, KzgError> {
    let mut file = File::open(path).map_err(io_error)?;
    let total_len = file.metadata().map_err(io_error)?.len() as usize;

    let mut prefix = [0u8; SrsLayout::PREFIX_SIZE];
    file.read_exact(&mut prefix).map_err(truncated)?;
    let max_degree = SrsLayout::parse_header(&prefix)?;

    let mut g2_count = [0u8; 4];
    file.seek(SeekFrom::Start(SrsLayout::g2_count_offset(max_degree)? as u64))
        .map_err(io_error)?;
    file.read_exact(&mut g2_count).map_err(truncated)?;

    SrsLayout::from_counts(max_degree, u32::from_be_bytes(g2_count) as usize, total_len)
}

/// Decodes `num_points` consecutive compressed points starting at `offset`.
///
/// The channel carries (bytes, position) pairs; the position of the first
/// point of each chunk is used to restore file order after decoding.
pub fn parallel_read_points<T>(
    file_path: PathBuf,
    offset: usize,
    num_points: usize,
) -> Result<Vec<T>, KzgError>
where
    T: ReadPointFromBytes + Send + 'static,
{
    let (sender, receiver) = bounded::<(Vec<u8>, usize)>(1000);

    let point_size = T::compressed_point_size();
    let reader_handle = std::thread::spawn(move || {
        read_file_chunks(&file_path, sender, offset, point_size, num_points)
    });

    let num_workers = num_cpus::get();
    let workers: Vec<_> = (0..num_workers)
        .map(|_| {
            let receiver = receiver.clone();
            std::thread::spawn(move || process_chunks::<T>(receiver))
        })
        .collect();
    // Workers stop once the reader's sender and this receiver are both gone.
    drop(receiver);

    let reader_result = reader_handle
        .join()
        .map_err(|_| KzgError::GenericError("Reader thread panicked.".to_string()))
        .and_then(|result| result);

    // A decoding error makes its worker hang up, which the reader may then
    // report instead, so worker errors take precedence.
    let mut all_points = Vec::with_capacity(num_points);
    for worker in workers {
        let points = worker
            .join()
            .map_err(|_| KzgError::GenericError("Worker thread panicked.".to_string()))??;
        all_points.extend(points);
    }
    reader_result?;

    all_points.sort_by_key(|&(_, position)| position);

    if all_points.len() != num_points {
        return Err(KzgError::SrsFormatError(format!(
            "Expected {} points, but got {}.",
            num_points,
            all_points.len()
        )));
    }

    Ok(all_points.into_iter().map(|(point, _)| point).collect())
}

fn process_chunks<T>(receiver: Receiver<(Vec<u8>, usize)>) -> Result<Vec<(T, usize)>, KzgError>
where
    T: ReadPointFromBytes,
{
    let point_size = T::compressed_point_size();
    let mut points = Vec::new();
    for (chunk, first_position) in receiver.iter() {
        for (i, bytes) in chunk.chunks_exact(point_size).enumerate() {
            let position = first_position + i;
            let point = T::read_point_from_bytes_compressed(bytes).map_err(|e| {
                KzgError::SrsFormatError(format!("point {position}: {e}"))
            })?;
            points.push((point, position));
        }
    }
    Ok(points)
}

fn read_file_chunks(
    file_path: &Path,
    sender: Sender<(Vec<u8>, usize)>,
    offset: usize,
    point_size: usize,
    num_points: usize,
) -> Result<(), KzgError> {
    let mut file = File::open(file_path).map_err(io_error)?;
    file.seek(SeekFrom::Start(offset as u64)).map_err(io_error)?;
    let mut reader = BufReader::new(file);

    let mut position = 0;
    while position < num_points {
        let points_in_chunk = POINTS_PER_CHUNK.min(num_points - position);
        let mut buffer = vec![0u8; points_in_chunk * point_size];
        reader.read_exact(&mut buffer).map_err(truncated)?;
        sender
            .send((buffer, position))
            .map_err(|_| KzgError::GenericError("decoder workers hung up".to_string()))?;
        position += points_in_chunk;
    }
    Ok(())
}

fn io_error(e: std::io::Error) -> KzgError {
    KzgError::GenericError(format!("failed to read srs file: {e}"))
}

fn truncated(_: std::io::Error) -> KzgError {
    KzgError::SrsFormatError("truncated srs file".to_string())
}
