//! `HKEY_CURRENT_USER` preference store.

use crate::clock::preferences::{
    PreferenceStore, StoredPreferences, BACKGROUND_COLOR_VALUE, FONT_FACE_VALUE,
    TEXT_COLOR_VALUE,
};
use anyhow::{anyhow, Context, Result};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
use windows::Win32::System::Registry::{
    RegCloseKey, RegCreateKeyExW, RegGetValueW, RegSetValueExW, HKEY, HKEY_CURRENT_USER,
    KEY_WRITE, REG_DWORD, REG_OPTION_NON_VOLATILE, REG_SZ, REG_VALUE_TYPE, RRF_RT_REG_DWORD,
    RRF_RT_REG_SZ,
};

fn widestring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Closes the key handle when dropped.
struct OwnedKey(HKEY);

impl Drop for OwnedKey {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.0);
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistryPreferenceStore {
    key_path: String,
}

impl RegistryPreferenceStore {
    pub fn current_user(key_path: &str) -> Self {
        Self {
            key_path: key_path.to_string(),
        }
    }

    fn read_dword(&self, value_name: &str) -> Result<Option<u32>> {
        let key_path = widestring(&self.key_path);
        let value = widestring(value_name);
        let mut data: u32 = 0;
        let mut size = std::mem::size_of::<u32>() as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                PCWSTR(key_path.as_ptr()),
                PCWSTR(value.as_ptr()),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut data as *mut u32 as *mut _),
                Some(&mut size),
            )
        };
        missing_as_none(status, data)
            .with_context(|| format!("read {}\\{value_name}", self.key_path))
    }

    fn read_string(&self, value_name: &str) -> Result<Option<String>> {
        let key_path = widestring(&self.key_path);
        let value = widestring(value_name);
        let mut buffer = [0_u16; 256];
        let mut size = std::mem::size_of_val(&buffer) as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                PCWSTR(key_path.as_ptr()),
                PCWSTR(value.as_ptr()),
                RRF_RT_REG_SZ,
                None,
                Some(buffer.as_mut_ptr() as *mut _),
                Some(&mut size),
            )
        };
        let chars = (size as usize / 2).min(buffer.len());
        let text = String::from_utf16_lossy(&buffer[..chars])
            .trim_end_matches('\0')
            .to_string();
        missing_as_none(status, text)
            .with_context(|| format!("read {}\\{value_name}", self.key_path))
    }

    fn open_for_write(&self) -> Result<OwnedKey> {
        let key_path = widestring(&self.key_path);
        let mut key = HKEY::default();
        unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(key_path.as_ptr()),
                0,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_WRITE,
                None,
                &mut key,
                None,
            )
        }
        .ok()
        .with_context(|| format!("create registry key {}", self.key_path))?;
        Ok(OwnedKey(key))
    }
}

fn missing_as_none<T>(status: WIN32_ERROR, value: T) -> Result<Option<T>> {
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    status
        .ok()
        .map_err(|err| anyhow!("registry query failed: {err}"))?;
    Ok(Some(value))
}

fn set_value(key: &OwnedKey, name: &str, kind: REG_VALUE_TYPE, data: &[u8]) -> Result<()> {
    let name_w = widestring(name);
    unsafe { RegSetValueExW(key.0, PCWSTR(name_w.as_ptr()), 0, kind, Some(data)) }
        .ok()
        .with_context(|| format!("write registry value {name}"))
}

/// One unreadable value leaves the others intact.
fn readable<T>(value_name: &str, value: Result<Option<T>>) -> Option<T> {
    match value {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(?err, value_name, "ignoring unreadable preference value");
            None
        }
    }
}

impl PreferenceStore for RegistryPreferenceStore {
    fn read(&self) -> Result<StoredPreferences> {
        Ok(StoredPreferences {
            text_color: readable(TEXT_COLOR_VALUE, self.read_dword(TEXT_COLOR_VALUE)),
            background_color: readable(
                BACKGROUND_COLOR_VALUE,
                self.read_dword(BACKGROUND_COLOR_VALUE),
            ),
            font_face: readable(FONT_FACE_VALUE, self.read_string(FONT_FACE_VALUE)),
        })
    }

    fn write(&self, preferences: &StoredPreferences) -> Result<()> {
        let key = self.open_for_write()?;
        if let Some(color) = preferences.text_color {
            set_value(&key, TEXT_COLOR_VALUE, REG_DWORD, &color.to_le_bytes())?;
        }
        if let Some(color) = preferences.background_color {
            set_value(&key, BACKGROUND_COLOR_VALUE, REG_DWORD, &color.to_le_bytes())?;
        }
        if let Some(face) = &preferences.font_face {
            let bytes: Vec<u8> = widestring(face)
                .into_iter()
                .flat_map(|unit| unit.to_le_bytes())
                .collect();
            set_value(&key, FONT_FACE_VALUE, REG_SZ, &bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{set_value, RegistryPreferenceStore};
    use crate::clock::preferences::{
        PreferenceStore, StoredPreferences, BACKGROUND_COLOR_VALUE, FONT_FACE_VALUE,
    };
    use windows::Win32::System::Registry::{REG_DWORD, REG_SZ};

    #[test]
    fn round_trip_through_scratch_key() {
        let store = RegistryPreferenceStore::current_user(r"Software\TimeDisplaySettingsTest");
        let stored = StoredPreferences {
            text_color: Some(0x0001_0203),
            background_color: Some(0x00aa_bbcc),
            font_face: Some("Consolas".to_string()),
        };
        store.write(&stored).expect("write registry");
        assert_eq!(store.read().expect("read registry"), stored);
    }

    #[test]
    fn wrong_typed_value_does_not_discard_the_others() {
        let store = RegistryPreferenceStore::current_user(r"Software\TimeDisplaySettingsMixed");
        store
            .write(&StoredPreferences {
                text_color: Some(0x0000_00ff),
                background_color: Some(0x00ff_0000),
                font_face: None,
            })
            .expect("write colors");
        let key = store.open_for_write().expect("open key");
        set_value(&key, FONT_FACE_VALUE, REG_DWORD, &7_u32.to_le_bytes()).expect("bad face");
        set_value(&key, BACKGROUND_COLOR_VALUE, REG_SZ, &[b'x', 0, 0, 0]).expect("bad color");

        let read = store.read().expect("read registry");
        assert_eq!(read.text_color, Some(0x0000_00ff));
        assert_eq!(read.background_color, None);
        assert_eq!(read.font_face, None);
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let store = RegistryPreferenceStore::current_user(r"Software\TimeDisplaySettingsMissing");
        assert_eq!(store.read().expect("read"), StoredPreferences::default());
    }
}
