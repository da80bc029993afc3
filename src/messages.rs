// SPDX-FileCopyrightText: 2026 anon_relay contributors
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Locale-keyed reply strings (English canonical, Arabic and Spanish
//! variants). Each `MessageKey` gets a concrete string per locale here.

use crate::types::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Welcome,
    AlreadyInChat,
    AlreadySearching,
    SearchWait,
    PartnerFound,
    EndMsgUser,
    EndMsgPartner,
    EndSearchCancel,
    EndNotInChat,
    LinkBlocked,
    UsernameBlocked,
    SettingsText,
    GloballyBanned,
    UseButtonsMsg,
    BlockConfirmText,
    BlockCancelled,
    BlockSuccess,
    NextMsgUser,
    NextAlreadySearching,
    BlockNotInChat,
    BlockWhileSearching,
    UnreachablePartner,
    NotInChatMsg,
    PartnerPrefix,
    JoinChannelMsg,
    JoinChannelBtn,
    SettingsSaved,
    FailedToSend,
}

/// Looks up the locale-specific string for `key`, falling back to
/// English for any gap (mirrors `Rp.py`'s `_()` translation helper).
pub fn text(locale: Locale, key: MessageKey) -> &'static str {
    match (locale, key) {
        (Locale::En, MessageKey::Welcome) => {
            "Welcome to 🎲 Random Partner\nThe anonymous Chat Bot!\n\nPress 'Search' to find a partner."
        }
        (Locale::Ar, MessageKey::Welcome) => {
            "مرحباً بك في 🎲 شريك عشوائي\nبوت الدردشة المجهول!\n\nاضغط 'بحث' للعثور على شريك."
        }
        (Locale::Es, MessageKey::Welcome) => {
            "¡Bienvenido a 🎲 Compañero Aleatorio\nEl Bot de Chat Anónimo!\n\nPresiona 'Buscar' para encontrar un compañero."
        }

        (Locale::En, MessageKey::AlreadyInChat) => {
            "You are currently in a chat. Use the buttons below."
        }
        (Locale::Ar, MessageKey::AlreadyInChat) => "أنت حالياً في محادثة. استخدم الأزرار أدناه.",
        (Locale::Es, MessageKey::AlreadyInChat) => {
            "Actualmente estás en un chat. Usa los botones de abajo."
        }

        (Locale::En, MessageKey::AlreadySearching) => {
            "You are currently in the waiting queue. Use the buttons below."
        }
        (Locale::Ar, MessageKey::AlreadySearching) => {
            "أنت حالياً في قائمة الانتظار. استخدم الأزرار أدناه."
        }
        (Locale::Es, MessageKey::AlreadySearching) => {
            "Actualmente estás en la cola de espera. Usa los botones de abajo."
        }

        (Locale::En, MessageKey::SearchWait) => "🔎 Searching for a partner... Please wait.",
        (Locale::Ar, MessageKey::SearchWait) => "🔎 البحث عن شريك... يرجى الانتظار.",
        (Locale::Es, MessageKey::SearchWait) => "🔎 Buscando un compañero... Por favor espera.",

        (Locale::En, MessageKey::PartnerFound) => {
            "✅ Partner found! The chat has started. (You are anonymous)."
        }
        (Locale::Ar, MessageKey::PartnerFound) => "✅ تم العثور على شريك! بدأت المحادثة. (أنت مجهول).",
        (Locale::Es, MessageKey::PartnerFound) => {
            "✅ ¡Compañero encontrado! El chat ha comenzado. (Eres anónimo)."
        }

        (Locale::En, MessageKey::EndMsgUser) => "🔚 You have ended the chat.",
        (Locale::Ar, MessageKey::EndMsgUser) => "🔚 لقد أنهيت المحادثة.",
        (Locale::Es, MessageKey::EndMsgUser) => "🔚 Has terminado el chat.",

        (Locale::En, MessageKey::EndMsgPartner) => "⚠️ Your partner has left the chat.",
        (Locale::Ar, MessageKey::EndMsgPartner) => "⚠️ لقد غادر شريكك المحادثة.",
        (Locale::Es, MessageKey::EndMsgPartner) => "⚠️ Tu compañero ha dejado el chat.",

        (Locale::En, MessageKey::EndSearchCancel) => "Search cancelled.",
        (Locale::Ar, MessageKey::EndSearchCancel) => "تم إلغاء البحث.",
        (Locale::Es, MessageKey::EndSearchCancel) => "Búsqueda cancelada.",

        (Locale::En, MessageKey::EndNotInChat) => {
            "You are not currently in a chat or searching."
        }
        (Locale::Ar, MessageKey::EndNotInChat) => "أنت لست في محادثة حالياً ولا تبحث.",
        (Locale::Es, MessageKey::EndNotInChat) => {
            "No estás actualmente en un chat ni buscando."
        }

        (Locale::En, MessageKey::LinkBlocked) => {
            "⛔️ You cannot send links (URLs) in anonymous chat."
        }
        (Locale::Ar, MessageKey::LinkBlocked) => "⛔️ لا يمكنك إرسال روابط (URLs) في الدردشة المجهولة.",
        (Locale::Es, MessageKey::LinkBlocked) => {
            "⛔️ No puedes enviar enlaces (URLs) en el chat anónimo."
        }

        (Locale::En, MessageKey::UsernameBlocked) => {
            "⛔️ You cannot send user identifiers (usernames) in anonymous chat."
        }
        (Locale::Ar, MessageKey::UsernameBlocked) => {
            "⛔️ لا يمكنك إرسال معرفات مستخدمين (usernames) في الدردشة المجهولة."
        }
        (Locale::Es, MessageKey::UsernameBlocked) => {
            "⛔️ No puedes enviar identificadores de usuario (usernames) en el chat anónimo."
        }

        (Locale::En, MessageKey::SettingsText) => {
            "🌐 Language Settings\n\nSelect your preferred language for the bot's interface and for matching partners:"
        }
        (Locale::Ar, MessageKey::SettingsText) => {
            "🌐 إعدادات اللغة\n\nاختر لغتك المفضلة لواجهة البوت وللمطابقة مع الشركاء:"
        }
        (Locale::Es, MessageKey::SettingsText) => {
            "🌐 Configuración de idioma\n\nSelecciona tu idioma preferido para la interfaz del bot y para emparejar compañeros:"
        }

        (Locale::En, MessageKey::GloballyBanned) => {
            "🚫 Your access to this bot has been suspended permanently."
        }
        (Locale::Ar, MessageKey::GloballyBanned) => "🚫 تم إيقاف وصولك إلى هذا البوت بشكل دائم.",
        (Locale::Es, MessageKey::GloballyBanned) => {
            "🚫 Tu acceso a este bot ha sido suspendido permanentemente."
        }

        (Locale::En, MessageKey::UseButtonsMsg) => "Use the buttons below to control the chat:",
        (Locale::Ar, MessageKey::UseButtonsMsg) => "استخدم الأزرار أدناه للتحكم في الدردشة:",
        (Locale::Es, MessageKey::UseButtonsMsg) => "Usa los botones de abajo para controlar el chat:",

        (Locale::En, MessageKey::BlockConfirmText) => {
            "🚫 CONFIRM BLOCK AND REPORT\n\nAre you sure you want to block the current partner and send a report? (This action will end the chat immediately.)"
        }
        (Locale::Ar, MessageKey::BlockConfirmText) => {
            "🚫 تأكيد الحظر والإبلاغ\n\nهل أنت متأكد أنك تريد حظر الشريك الحالي وإرسال تقرير؟ (سيؤدي هذا الإجراء إلى إنهاء المحادثة فوراً.)"
        }
        (Locale::Es, MessageKey::BlockConfirmText) => {
            "🚫 CONFIRMAR BLOQUEO Y REPORTE\n\n¿Seguro que quieres bloquear a tu compañero actual y enviar un reporte? (Esta acción terminará el chat de inmediato.)"
        }

        (Locale::En, MessageKey::BlockCancelled) => {
            "🚫 Block/Report operation cancelled. You can continue chatting."
        }
        (Locale::Ar, MessageKey::BlockCancelled) => {
            "🚫 تم إلغاء عملية الحظر/الإبلاغ. يمكنك متابعة الدردشة."
        }
        (Locale::Es, MessageKey::BlockCancelled) => {
            "🚫 Operación de bloqueo/reporte cancelada. Puedes seguir chateando."
        }

        (Locale::En, MessageKey::BlockSuccess) => {
            "🛑 Thank you! The user has been blocked and the chat has ended.\n\nPress Next 🎲 to find a new partner."
        }
        (Locale::Ar, MessageKey::BlockSuccess) => {
            "🛑 شكراً لك! تم حظر المستخدم وتم إنهاء المحادثة.\n\nاضغط التالي 🎲 للعثور على شريك جديد."
        }
        (Locale::Es, MessageKey::BlockSuccess) => {
            "🛑 ¡Gracias! El usuario ha sido bloqueado y el chat ha terminado.\n\nPulsa Siguiente 🎲 para encontrar un nuevo compañero."
        }

        (Locale::En, MessageKey::NextMsgUser) => "🔎 Searching for a new partner...",
        (Locale::Ar, MessageKey::NextMsgUser) => "🔎 البحث عن شريك جديد...",
        (Locale::Es, MessageKey::NextMsgUser) => "🔎 Buscando un nuevo compañero...",

        (Locale::En, MessageKey::NextAlreadySearching) => "You are already searching. Please wait...",
        (Locale::Ar, MessageKey::NextAlreadySearching) => "أنت بالفعل تبحث. يرجى الانتظار...",
        (Locale::Es, MessageKey::NextAlreadySearching) => "Ya estás buscando. Por favor espera...",

        (Locale::En, MessageKey::BlockNotInChat) => {
            "You are not currently in a chat to block anyone."
        }
        (Locale::Ar, MessageKey::BlockNotInChat) => "أنت لست حالياً في محادثة لحظر أي شخص.",
        (Locale::Es, MessageKey::BlockNotInChat) => {
            "No estás actualmente en un chat para bloquear a alguien."
        }

        (Locale::En, MessageKey::BlockWhileSearching) => {
            "You cannot block anyone while searching. Use 'Stop' first."
        }
        (Locale::Ar, MessageKey::BlockWhileSearching) => {
            "لا يمكنك الحظر أثناء البحث. استخدم 'إيقاف' أولاً."
        }
        (Locale::Es, MessageKey::BlockWhileSearching) => {
            "No puedes bloquear a nadie mientras buscas. Usa 'Parar' primero."
        }

        (Locale::En, MessageKey::UnreachablePartner) => {
            "Your partner seems to have blocked the bot or left. The chat has ended."
        }
        (Locale::Ar, MessageKey::UnreachablePartner) => {
            "يبدو أن شريكك قام بحظر البوت أو غادر. انتهت المحادثة."
        }
        (Locale::Es, MessageKey::UnreachablePartner) => {
            "Parece que tu compañero bloqueó al bot o se fue. El chat ha terminado."
        }

        (Locale::En, MessageKey::NotInChatMsg) => {
            "You are not in a chat. Press 'Search' to find a partner."
        }
        (Locale::Ar, MessageKey::NotInChatMsg) => "أنت لست في محادثة. اضغط 'بحث' للعثور على شريك.",
        (Locale::Es, MessageKey::NotInChatMsg) => {
            "No estás en un chat. Presiona 'Buscar' para encontrar un compañero."
        }

        (Locale::En, MessageKey::PartnerPrefix) => "Random partner 🎲: ",
        (Locale::Ar, MessageKey::PartnerPrefix) => "صديق/ة 🎲: ",
        (Locale::Es, MessageKey::PartnerPrefix) => "Compañero aleatorio 🎲: ",

        (Locale::En, MessageKey::JoinChannelMsg) => {
            "👋 Welcome to Random Partner 🎲!\n\nTo use this bot, you are required to join our official channel."
        }
        (Locale::Ar, MessageKey::JoinChannelMsg) => {
            "👋 مرحباً بك في شريك عشوائي 🎲!\n\nلاستخدام هذا البوت، يجب عليك الانضمام إلى قناتنا الرسمية."
        }
        (Locale::Es, MessageKey::JoinChannelMsg) => {
            "👋 ¡Bienvenido a Compañero Aleatorio 🎲!\n\nPara usar este bot, debes unirte a nuestro canal oficial."
        }

        (Locale::En, MessageKey::JoinChannelBtn) => "Join Channel",
        (Locale::Ar, MessageKey::JoinChannelBtn) => "انضم للقناة",
        (Locale::Es, MessageKey::JoinChannelBtn) => "Unirse al Canal",

        (Locale::En, MessageKey::SettingsSaved) => "✅ Language updated. Press /start to see the changes.",
        (Locale::Ar, MessageKey::SettingsSaved) => "✅ تم تحديث اللغة. اضغط /start لرؤية التغييرات.",
        (Locale::Es, MessageKey::SettingsSaved) => {
            "✅ Idioma actualizado. Presiona /start para ver los cambios."
        }

        (Locale::En, MessageKey::FailedToSend) => "Failed to send. Please try again.",
        (Locale::Ar, MessageKey::FailedToSend) => "فشل الإرسال. يرجى المحاولة مرة أخرى.",
        (Locale::Es, MessageKey::FailedToSend) => "Error al enviar. Por favor, inténtalo de nuevo.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_has_a_partner_prefix() {
        for locale in Locale::ALL {
            assert!(!text(locale, MessageKey::PartnerPrefix).is_empty());
        }
    }
}
