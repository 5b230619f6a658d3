// ============================================================
// Layer 6 - Device Selection
// ============================================================
// SURROGATE_GPU_DEVICES decides where training runs:
//
//   unset, "" or a negative index ("-1") → CPU (ndarray backend)
//   "0", "1", ... → that GPU index (wgpu backend)
//   anything else → the default GPU
//
// GPU support is compiled in only with the `gpu` feature;
// without it a GPU request is logged and CPU is used.

pub const GPU_ENV: &str = "SURROGATE_GPU_DEVICES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceChoice {
    Cpu,
    Gpu(Option<usize>),
}

impl DeviceChoice {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(GPU_ENV).ok().as_deref())
    }

    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => DeviceChoice::Cpu,
            Some(v) => match v.split(',').next().map(str::trim).and_then(|i| i.parse::<i64>().ok()) {
                Some(i) if i < 0 => DeviceChoice::Cpu,
                Some(i) => DeviceChoice::Gpu(usize::try_from(i).ok()),
                None => DeviceChoice::Gpu(None),
            },
        }
    }

    /// The choice this build can honour.
    pub fn resolve(self) -> Self {
        match self {
            DeviceChoice::Gpu(_) if !cfg!(feature = "gpu") => {
                tracing::warn!(
                    "{} requests a GPU but this build has no `gpu` feature; using CPU",
                    GPU_ENV
                );
                DeviceChoice::Cpu
            }
            other => other,
        }
    }
}

#[cfg(feature = "gpu")]
pub fn wgpu_device(index: Option<usize>) -> burn::backend::wgpu::WgpuDevice {
    match index {
        Some(i) => burn::backend::wgpu::WgpuDevice::DiscreteGpu(i),
        None => burn::backend::wgpu::WgpuDevice::default(),
    }
}
