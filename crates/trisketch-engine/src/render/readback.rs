use futures::channel::oneshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadBackError {
    #[error("failed to map staging buffer")]
    Map(#[source] wgpu::BufferAsyncError),

    #[error("device poll failed")]
    Poll(#[source] wgpu::PollError),

    #[error("map callback dropped before completing")]
    Canceled(#[source] oneshot::Canceled),
}

/// Maps a `MAP_READ` buffer and copies its contents out.
///
/// Blocks until the mapping completes; commands writing the buffer must
/// already be submitted.
pub(crate) fn map_read(device: &wgpu::Device, buffer: &wgpu::Buffer) -> Result<Vec<u8>, ReadBackError> {
    let slice = buffer.slice(..);
    let (sender, receiver) = oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(ReadBackError::Poll)?;

    pollster::block_on(receiver)
        .map_err(ReadBackError::Canceled)?
        .map_err(ReadBackError::Map)?;

    let bytes = slice.get_mapped_range().to_vec();
    buffer.unmap();
    Ok(bytes)
}
