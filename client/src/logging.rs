use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(msg: &str, format: &str);
    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(msg: &str, format: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(msg: &str, format: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(msg: &str, format: &str);
}

/// Routes `log` records to the browser console with a coloured level tag.
pub struct ConsoleLog;

static LOGGER: ConsoleLog = ConsoleLog;

impl log::Log for ConsoleLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let (write, name, color): (fn(&str, &str), &str, &str) = match record.level() {
            log::Level::Trace => (console_log, "trace", "color:plum"),
            log::Level::Debug => (console_log, "debug", "color:cyan"),
            log::Level::Info => (console_info, "info", "color:mediumseagreen"),
            log::Level::Warn => (console_warn, "warn", "color:goldenrod"),
            log::Level::Error => (console_error, "error", "color:red"),
        };
        write(&format!("%c{name}\t{}", record.args()), color);
    }

    fn flush(&self) {}
}

/// Safe to call on every activation; only the first call installs anything.
pub fn init(level: log::LevelFilter) {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
