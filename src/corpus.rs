use crate::rag::DocumentInput;

/// Pre-seeded Pakistan-law corpus, loadable through the seed endpoint so a
/// fresh process can answer questions immediately.
pub fn initial_legal_documents() -> Vec<DocumentInput> {
    vec![
        DocumentInput {
            title: "Constitution of Pakistan - Preamble".to_string(),
            content: "Whereas sovereignty over the entire Universe belongs to Almighty Allah alone, and the authority to be exercised by the people of Pakistan within the limits prescribed by Him is a sacred trust;\n\
And whereas it is the will of the people of Pakistan to establish an order;\n\
Wherein the State shall exercise its powers and authority through the chosen representatives of the people;\n\
Wherein the principles of democracy, freedom, equality, tolerance and social justice, as enunciated by Islam, shall be fully observed;\n\
Wherein the Muslims shall be enabled to order their lives in the individual and collective spheres in accordance with the teachings and requirements of Islam as set out in the Holy Quran and Sunnah;\n\
Wherein adequate provision shall be made for the minorities freely to profess and practise their religions and develop their cultures;"
                .to_string(),
        },
        DocumentInput {
            title: "Constitution of Pakistan - Article 1: The Republic and its territories".to_string(),
            content: "(1) Pakistan shall be a Federal Republic to be known as the Islamic Republic of Pakistan, hereinafter referred to as Pakistan.\n\
(2) The territories of Pakistan shall comprise:\n\
(a) the Provinces of Balochistan, the Khyber Pakhtunkhwa, the Punjab and Sindh;\n\
(b) the Islamabad Capital Territory, hereinafter referred to as the Federal Capital;\n\
(c) the Federally Administered Tribal Areas; and\n\
(d) such States and territories as are or may be included in Pakistan, whether by accession or otherwise.\n\
(3) Majlis-e-Shoora (Parliament) may by law admit into the Federation new States or areas on such terms and conditions as it thinks fit."
                .to_string(),
        },
        DocumentInput {
            title: "Constitution of Pakistan - Article 4: Right of individuals".to_string(),
            content: "(1) To enjoy the protection of law and to be treated in accordance with law is the inalienable right of every citizen, wherever he may be, and of every other person for the time being within Pakistan.\n\
(2) In particular:\n\
(a) no action detrimental to the life, liberty, body, reputation or property of any person shall be taken except in accordance with law;\n\
(b) no person shall be prevented from or be hindered in doing that which is not prohibited by law; and\n\
(c) no person shall be compelled to do that which the law does not require him to do."
                .to_string(),
        },
        DocumentInput {
            title: "Pakistan Penal Code - Section 302: Punishment of qatl-i-amd".to_string(),
            content: "Whoever commits qatl-i-amd shall, subject to the provisions of this Chapter be:\n\
(a) punished with death as qisas;\n\
(b) punished with death or imprisonment for life as ta'zir having regard to the facts and circumstances of the case, if the proof in either of the forms specified in section 304 is not available; or\n\
(c) punished with imprisonment of either description for a term which may extend to twenty-five years, where according to the Injunctions of Islam the punishment of qisas is not applicable."
                .to_string(),
        },
    ]
}
