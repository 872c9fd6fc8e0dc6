/// Returns the last OS error (errno / `GetLastError`) converted into the crate error.
macro_rules! return_os_error {
    () => {{
        return Err(std::io::Error::last_os_error().into());
    }};
}
