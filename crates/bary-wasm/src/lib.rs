use wasm_bindgen::prelude::*;
use bary_core::{Engine, EngineParams, Mode, NoiseError};

fn to_js(e: NoiseError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Browser-facing handle on a noise engine.
///
/// Mirrors the engine's life cycle: construct, `regen()`, then `eval(x, y)`
/// per pixel. Changing the mode requires another `regen()`.
#[wasm_bindgen]
pub struct BarycentricNoise {
    engine: Engine,
}

#[wasm_bindgen]
impl BarycentricNoise {
    /// `mode` accepts the canonical names and the demo's short names
    /// (`independent`, `barycentric_variant`, `barycentric`).
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize, width: usize, height: usize, mode: &str) -> Result<BarycentricNoise, JsValue> {
        let mode: Mode = mode.parse().map_err(to_js)?;
        let engine = Engine::new(EngineParams::new(n, width, height, mode)).map_err(to_js)?;
        Ok(Self { engine })
    }

    /// Build from a JSON params object, e.g. `{"n": 3, "mode": "barycentric"}`.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(params_json: &str) -> Result<BarycentricNoise, JsValue> {
        let params: EngineParams = serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid params: {e}")))?;
        let engine = Engine::new(params).map_err(to_js)?;
        Ok(Self { engine })
    }

    /// Draw new gradients. Degenerate draws are retried a few times.
    pub fn regen(&mut self) -> Result<(), JsValue> {
        self.engine.regen_with_retries(8).map(|_| ()).map_err(to_js)
    }

    /// Field value at `(x, y)` as a `Float64Array` of length n.
    pub fn eval(&self, x: f64, y: f64) -> Result<Vec<f64>, JsValue> {
        self.engine.eval(x, y).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: Mode = mode.parse().map_err(to_js)?;
        self.engine.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Current params as a plain JS object.
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.engine.params()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
