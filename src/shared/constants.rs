/// Form field carrying the province name on the HTML page
pub const LABEL_FIELD: &str = "nama_provinsi";

/// Maximum length of the province name
pub const MAX_LABEL_LENGTH: u64 = 255;

/// Upper bound for `rows` on the dataset preview endpoint
pub const MAX_PREVIEW_ROWS: usize = 100;

// =============================================================================
// PAGE TEXT
// =============================================================================

pub const PAGE_TITLE: &str = "Prediksi Decision Tree";

pub const PAGE_HEADER: &str =
    "Prediksi Tingkat Pengangguran di Indonesia Berdasarkan Faktor Ekonomi";

pub const PAGE_DESCRIPTION: &str =
    "Aplikasi ini memprediksi tingkat pengangguran berdasarkan input variabel yang relevan.";

pub const FOOTER_TEXT: &str = "Dibuat dengan ❤️ oleh Tim Bhinneka";

/// Sidebar legend describing the expected inputs
pub const FEATURE_LEGEND: &[&str] = &[
    "Nama provinsi yang ingin diprediksi",
    "Jumlah Angkatan Kerja (AK) provinsi",
    "Pengeluaran Perkapita provinsi",
    "Produk Domestik Regional Bruto (PDRB) provinsi",
    "Upah rata-rata per jam pekerja",
    "Pertumbuhan Produksi Industri Kecil dan Menengah (PP IKM) (Year to Year)",
    "PDRB (Rupiah) perkapita provinsi atas harga berlaku",
    "Jumlah Penduduk (dalam ribu jiwa) provinsi",
    "Gini ratio provinsi",
    "Jumlah perusahaan konstruksi skala kecil (PK-K)",
    "Jumlah perusahaan konstruksi skala menengah (PK-M)",
    "Jumlah perusahaan konstruksi skala besar (PK-B)",
    "Jumlah Industri Mikro",
    "Jumlah Industri Kecil",
];
