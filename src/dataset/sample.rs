//! Built-in corpora used when no training file is available.

use crate::dataset::TrainingSet;

const DISEASE_ROWS: &[(&str, &str)] = &[
    ("Demam tinggi, pilek, hidung tersumbat, bersin-bersin, batuk kering, sakit tenggorokan, nyeri otot", "Flu"),
    ("Badan panas dingin, kepala pusing, batuk pilek, hidung meler", "Flu"),
    ("Demam, nyeri otot, sakit kepala, bersin, hidung tersumbat, batuk", "Flu"),
    ("Badan menggigil, demam, batuk kering, sakit kepala, hidung meler", "Flu"),
    ("Hidung mampet, bersin-bersin, tenggorokan sakit, tubuh panas dingin", "Flu"),
    ("Batuk pilek, badan pegal-pegal, demam naik turun, mata berair", "Flu"),
    ("Demam tinggi mendadak, nyeri di belakang mata, sakit kepala parah, ruam merah, nyeri sendi dan otot", "Demam Berdarah"),
    ("Demam 40 derajat, nyeri otot dan sendi, mual, muntah, bintik merah di kulit", "Demam Berdarah"),
    ("Demam tinggi, perdarahan gusi, mimisan, bintik merah di tubuh, mual dan muntah", "Demam Berdarah"),
    ("Panas tinggi, nyeri otot dan sendi parah, mata merah dan nyeri, lemas, bintik kemerahan", "Demam Berdarah"),
    ("Mimisan berulang, gusi berdarah, demam tinggi selama beberapa hari, lemas tak bertenaga", "Demam Berdarah"),
    ("Muntah terus menerus, demam sangat tinggi, sakit kepala parah, nyeri otot dan sendi, ruam merah", "Demam Berdarah"),
    ("Demam tinggi berkelanjutan, sakit kepala, nafsu makan menurun, nyeri perut, sembelit atau diare", "Tipes"),
    ("Demam naik secara bertahap, lemas, sakit perut, tidak nafsu makan, lidah kotor", "Tipes"),
    ("Panas tinggi terus menerus, nyeri perut bagian kanan bawah, sembelit, lidah berselaput", "Tipes"),
    ("Demam lebih dari seminggu, sakit kepala, tidak nafsu makan, perut tidak nyaman", "Tipes"),
    ("Panas terus-menerus, lemas, mual, sakit perut, lidah kotor, konstipasi", "Tipes"),
    ("Demam yang naik di sore hari, lidah putih kotor, sakit perut, sembelit bergantian dengan diare, lemah lesu", "Tipes"),
    ("Nyeri perut bagian atas, perut kembung, mual, muntah, cepat kenyang, sendawa", "Maag"),
    ("Sakit perut terutama saat lapar, mual, perut terasa penuh dan kembung", "Maag"),
    ("Nyeri terbakar di ulu hati, perut kembung, sendawa terus-menerus, mual setelah makan", "Maag"),
    ("Perih di lambung jika telat makan, mual, mulut terasa asam, nafsu makan berkurang", "Maag"),
    ("Sakit perut bagian atas setelah makan pedas, mual dan muntah, perut kembung", "Maag"),
    ("Nyeri seperti terbakar di dada dan perut atas, sendawa asam, kembung", "Maag"),
    ("Sesak napas mendadak, mengi saat bernapas, dada terasa sesak, batuk-batuk terutama malam hari", "Asma"),
    ("Sulit bernapas terutama saat beraktivitas, bunyi mengi saat napas, batuk kering berulang", "Asma"),
    ("Napas berbunyi seperti peluit, dada terasa tertekan, sulit bernapas saat tertawa atau olahraga", "Asma"),
    ("Serangan sesak napas di malam hari, batuk kering terus menerus, napas bunyi mengi", "Asma"),
    ("Kesulitan bernapas setelah terpapar udara dingin, debu, atau asap, dada sesak", "Asma"),
    ("Batuk kering terus menerus terutama malam hari, napas pendek, dada terasa berat", "Asma"),
    ("Sakit kepala berdenyut di satu sisi, mual, muntah, sensitif terhadap cahaya dan suara", "Migrain"),
    ("Nyeri kepala parah, pandangan kabur, sensitif terhadap cahaya, mual", "Migrain"),
    ("Nyeri kepala sebelah, sensitif terhadap cahaya dan suara, mual, muntah", "Migrain"),
    ("Sakit kepala hebat, mual, mata berkunang-kunang, sensitif terhadap suara", "Migrain"),
    ("Melihat kilatan cahaya sebelum sakit kepala, nyeri berdenyut di satu sisi kepala", "Migrain"),
    ("Kepala berdenyut seperti ditusuk-tusuk di satu sisi, mual, sensitif terhadap bau", "Migrain"),
    ("BAB cair lebih dari 3 kali sehari, sakit perut, kram perut, mual, muntah", "Diare"),
    ("BAB encer berkali-kali, perut kram, mual, lemas, dehidrasi", "Diare"),
    ("Buang air besar cair berkali-kali, sakit perut, mual, muntah, kurang nafsu makan", "Diare"),
    ("Mencret berkali-kali, kram perut, mual, muntah, haus terus", "Diare"),
    ("Feses berair, rasa tidak nyaman di perut, sering ke toilet, mual", "Diare"),
    ("Perut kram sebelum BAB, feses sangat encer, tubuh terasa lemah", "Diare"),
    ("Sering buang air kecil, selalu haus, selalu lapar, berat badan turun, pandangan kabur, luka lambat sembuh", "Diabetes"),
    ("Kencing terus-menerus, haus terus, lapar berlebihan, berat badan menurun", "Diabetes"),
    ("Sering kencing terutama malam hari, haus berlebihan, lemas, luka sulit sembuh", "Diabetes"),
    ("Haus terus, sering pipis, cepat lelah, berat badan turun tanpa sebab", "Diabetes"),
    ("Luka yang lama sembuh, sering haus dan lapar, kencing berkali-kali di malam hari", "Diabetes"),
    ("Kesemutan pada tangan dan kaki, haus luar biasa, sering kencing, lemas", "Diabetes"),
];

const FILM_ROWS: &[(&str, &str)] = &[
    ("Saya suka film aksi dengan banyak ledakan dan kejar-kejaran mobil", "Action"),
    ("Film laga dengan adegan perkelahian seru dan superhero", "Action"),
    ("Pengen nonton yang penuh pertarungan dan tembak-tembakan", "Action"),
    ("Suka film perang dengan pasukan dan pertempuran besar", "Action"),
    ("Film komedi yang bikin ketawa terus", "Comedy"),
    ("Mau nonton yang lucu dan menghibur untuk santai", "Comedy"),
    ("Cerita konyol dengan banyak lelucon dan tingkah kocak", "Comedy"),
    ("Film lucu tentang persahabatan yang kocak", "Comedy"),
    ("Film horor yang seram dengan hantu dan rumah angker", "Horror"),
    ("Suka yang menakutkan, banyak jumpscare dan setan", "Horror"),
    ("Cerita hantu di desa terpencil yang bikin merinding", "Horror"),
    ("Film seram tentang kutukan dan arwah penasaran", "Horror"),
    ("Film romantis tentang cinta pertama di sekolah", "Romance"),
    ("Kisah cinta yang bikin baper dan menyentuh hati", "Romance"),
    ("Cerita pacaran jarak jauh yang mengharukan", "Romance"),
    ("Suka film tentang pasangan yang jatuh cinta", "Romance"),
    ("Film animasi kartun untuk ditonton bersama keluarga", "Animation"),
    ("Kartun lucu tentang hewan yang bisa bicara", "Animation"),
    ("Animasi petualangan anak dengan gambar yang indah", "Animation"),
    ("Film kartun dengan lagu-lagu dan putri kerajaan", "Animation"),
    ("Film menegangkan tentang pembunuh berantai dan detektif", "Thriller"),
    ("Cerita penuh ketegangan dengan plot twist di akhir", "Thriller"),
    ("Suka yang tegang, penculikan dan penyanderaan", "Thriller"),
    ("Film misteri penuh teka-teki yang bikin deg-degan", "Thriller"),
];

/// Symptom descriptions for eight common diseases.
pub fn disease_corpus() -> TrainingSet {
    TrainingSet::from_pairs(DISEASE_ROWS)
}

/// Viewing preferences for six genres.
pub fn film_corpus() -> TrainingSet {
    TrainingSet::from_pairs(FILM_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_corpora_are_balanced() {
        for set in [disease_corpus(), film_corpus()] {
            let counts = set.label_counts();
            assert!(counts.len() >= 6);
            let first = *counts.values().next().unwrap();
            assert!(counts.values().all(|&c| c == first));
        }
    }
}
