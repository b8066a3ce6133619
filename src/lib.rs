#![doc = r#"
aspectpipe: aspect-ratio aware resizing and object-storage upload for node-based
image pipelines.

The crate resizes images to an exact target size without distorting them:

- **aspect fill** scales by the larger of the two axis factors so the target is fully
  covered, then center-crops the overflow;
- **aspect fit** scales by the smaller factor so the whole image is visible, then
  centers it on a solid black or white canvas.

Both are deterministic, operate on owned 8-bit RGB [`Image`]s, and process each image
of a batch independently. Around that core sit a batch tensor adapter for hosts that
pass `[batch, height, width, channel]` float arrays, a [`node`] layer describing the
nodes' parameter schema, and a [`storage`] module that uploads an image to Google
Cloud Storage and returns its public URL.

Quick start: resize a file
--------------------------
```rust,no_run
use std::path::Path;
use aspectpipe::{api::resize_file_to_path, PadColor, ResizeMode, TargetSpec};

fn main() -> aspectpipe::Result<()> {
    let spec = TargetSpec::new(640, 640, ResizeMode::AspectFit, PadColor::White);
    resize_file_to_path(
        Path::new("/data/photo.jpg"),
        Path::new("/out/photo.png"),
        &spec,
        None, // infer the format from the output extension
    )
}
```

Resize in memory
----------------
```rust
use aspectpipe::{aspect_resize, Image, PadColor, ResizeMode, TargetSpec};

fn main() -> aspectpipe::Result<()> {
    let img = Image::from_fn(1920, 1080, |x, y| [(x % 256) as u8, (y % 256) as u8, 128])?;
    let spec = TargetSpec::new(640, 640, ResizeMode::AspectFill, PadColor::Black);
    let out = aspect_resize(&img, &spec)?;
    assert_eq!(out.dimensions(), (640, 640));
    Ok(())
}
```

Upload to GCS
-------------
```rust,no_run
use std::path::Path;
use aspectpipe::{api::upload_file, storage::GcsConfig, UploadOutcome};

fn main() -> aspectpipe::Result<()> {
    let outcome = upload_file(
        Path::new("/out/photo.png"),
        "my-bucket",
        Path::new("/secrets/service-account.json"),
        GcsConfig::default(),
    )?;
    match outcome {
        UploadOutcome::Uploaded { url, .. } => println!("{url}"),
        UploadOutcome::Failed { reason } => eprintln!("upload failed: {reason}"),
    }
    Ok(())
}
```

Error handling
--------------
All fallible functions return `aspectpipe::Result<T>`; match on `aspectpipe::Error` to
handle specific cases such as `InvalidSourceDimensions` or `InvalidTargetDimensions`.
Uploads never fail through `Result` once the image is loaded: the outcome is a tagged
[`UploadOutcome`].

Useful modules
--------------
- [`api`]: high-level, ergonomic entry points.
- [`core`]: image type, parameters, batch adapter and the resize/padding primitives.
- [`node`]: node schema trait and registry.
- [`storage`]: credentials, GCS client and the upload flow.
- [`io`]: image decoding and PNG/JPEG writers.
- [`types`]: `ResizeMode`, `PadColor`, `OutputFormat`.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod node;
pub mod storage;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::batch::ImageBatch;
pub use crate::core::image::Image;
pub use crate::core::params::TargetSpec;
pub use error::{Error, Result};
pub use types::{OutputFormat, PadColor, ResizeMode};

// Resize primitives
pub use crate::core::processing::resize::{
    aspect_fill, aspect_fit, aspect_resize, aspect_resize_batch, calculate_scaled_dimensions,
};

// Upload
pub use storage::{ServiceAccountCredentials, UploadError, UploadOutcome, upload_image};

// High-level API re-exports
pub use api::{BatchReport, resize_directory_to_path, resize_file_to_path, upload_file};
